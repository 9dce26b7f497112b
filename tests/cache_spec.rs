use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use launch_catalog::cache::{Cache, CacheError, LauncherCache, VehicleFamilyCache};
use launch_catalog::models::*;
use launch_catalog::report::{RecordingReporter, Severity};
use launch_catalog::repository::{FileRepository, Repository};
use speculate2::speculate;

fn fleet() -> Vec<Launcher> {
    vec![
        Launcher::new("Kestrel", 221000.0).with_fairing(14.0, 3.0),
        Launcher::new("Osprey", 225000.0).with_capability(OrbitType::Leo, 1.0, 9.5),
        Launcher::new("Condor", 235000.0).with_fairing(18.0, 3.75),
    ]
}

fn names<'a>(launchers: impl IntoIterator<Item = &'a Launcher>) -> HashSet<String> {
    launchers.into_iter().map(|l| l.name.clone()).collect()
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let reporter = Arc::new(RecordingReporter::new());
        let repo: FileRepository<Launcher> = FileRepository::new(dir.path().join("Launchers"));
        for launcher in fleet() {
            repo.create(&launcher).expect("Failed to seed launcher");
        }
        let mut cache: LauncherCache = Cache::new(repo.clone(), reporter.clone());
    }

    describe "populate" {
        it "loads every stored entity" {
            assert_eq!(cache.populate(), 3);
            assert_eq!(names(cache.iter()), names(&fleet()));
        }

        it "yields the same contents when called twice" {
            cache.populate();
            let first = names(cache.iter());
            cache.populate();

            assert_eq!(cache.len(), 3);
            assert_eq!(names(cache.iter()), first);
        }

        it "skips and reports entries that fail to load" {
            let path = repo.file_for("Broken");
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "garbage").unwrap();

            assert_eq!(cache.populate(), 3);
            let reports = reporter.reports();
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].severity, Severity::Error);
            assert!(reports[0].message.contains("launcher"));
        }

        it "is empty when nothing is stored" {
            let empty_repo: FileRepository<Launcher> = FileRepository::new(dir.path().join("Nowhere"));
            let mut empty: LauncherCache = Cache::new(empty_repo, reporter.clone());

            assert_eq!(empty.populate(), 0);
            assert!(empty.is_empty());
            assert!(reporter.is_empty());
        }
    }

    describe "add" {
        it "ignores an entity that is already cached" {
            let kestrel = fleet().remove(0);
            assert!(cache.add(kestrel.clone()));
            assert!(!cache.add(kestrel));
            assert_eq!(cache.len(), 1);
        }

        it "treats a different price as a different entity" {
            let kestrel = fleet().remove(0);
            let mut discounted = kestrel.clone();
            discounted.price = 200000.0;

            cache.add(kestrel);
            cache.add(discounted);

            assert_eq!(cache.len(), 2);
        }

        it "loads by name from storage" {
            assert!(cache.add_by_name("Osprey"));
            assert_eq!(cache.retrieve("Osprey").unwrap().unwrap().price, 225000.0);
        }

        it "adds nothing for a name that is not stored" {
            assert!(!cache.add_by_name("Albatross"));
            assert!(cache.is_empty());

            let reports = reporter.reports();
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].severity, Severity::Warning);
            assert!(reports[0].message.contains("Albatross"));
        }

        it "loads by name in any case" {
            assert!(cache.add_by_name("OSPREY"));
            assert_eq!(cache.retrieve("Osprey").unwrap().unwrap().name, "Osprey");
            assert!(reporter.is_empty());
        }

        it "reports a storage failure and adds nothing" {
            assert!(!cache.add_by_name("bad/name"));
            assert!(cache.is_empty());
            assert_eq!(reporter.len(), 1);
        }

        it "counts only new entities in a range" {
            cache.add(fleet().remove(0));
            assert_eq!(cache.add_range(fleet()), 2);
            assert_eq!(cache.len(), 3);
        }
    }

    describe "remove" {
        it "removes an entity by equality" {
            cache.populate();
            let osprey = cache.retrieve("Osprey").unwrap().unwrap().clone();

            assert!(cache.remove(&osprey));
            assert!(!cache.contains(&osprey));
            assert!(cache.cached_objects().iter().all(|l| l.key() != osprey.key()));
        }

        it "does nothing for an entity that is not cached" {
            cache.populate();
            assert!(!cache.remove(&Launcher::new("Albatross", 1.0)));
            assert_eq!(cache.len(), 3);
        }

        it "removes by name ignoring case" {
            cache.populate();
            assert!(cache.remove_by_name("CONDOR"));
            assert!(cache.retrieve("Condor").unwrap().is_none());
            assert_eq!(cache.len(), 2);
        }
    }

    describe "refresh" {
        it "discards in-memory edits in favour of the stored copy" {
            cache.populate();
            let mut edited = cache.retrieve("Kestrel").unwrap().unwrap().clone();
            cache.remove_by_name("Kestrel");
            edited.price = 1.0;
            cache.add(edited.clone());

            assert!(cache.refresh_entity(&edited));

            assert_eq!(cache.len(), 3);
            assert_eq!(cache.retrieve("Kestrel").unwrap().unwrap().price, 221000.0);
        }

        it "replaces the stored copy when given an edited clone" {
            cache.populate();
            let mut edited = cache.retrieve("Kestrel").unwrap().unwrap().clone();
            edited.price = 1.0;

            assert!(cache.refresh_entity(&edited));

            assert_eq!(cache.len(), 3);
            assert_eq!(cache.retrieve("Kestrel").unwrap().unwrap().price, 221000.0);
        }

        it "refreshes by name" {
            cache.populate();
            let mut changed = repo.retrieve("Osprey").unwrap().unwrap();
            changed.price = 300000.0;
            repo.update(&changed).expect("Failed to update");

            assert!(cache.refresh_by_name("osprey"));
            assert_eq!(cache.retrieve("Osprey").unwrap().unwrap().price, 300000.0);
        }

        it "drops entities that were never stored" {
            cache.populate();
            cache.add(Launcher::new("Unsaved", 5.0));
            assert_eq!(cache.len(), 4);

            assert_eq!(cache.refresh(), 3);
            assert!(cache.retrieve("Unsaved").unwrap().is_none());
        }

        it "leaves out an entity deleted from storage" {
            cache.populate();
            repo.delete("Condor").expect("Failed to delete");

            assert!(!cache.refresh_by_name("Condor"));
            assert_eq!(cache.len(), 2);
        }
    }

    describe "retrieve" {
        it "matches names case-insensitively" {
            cache.populate();
            assert_eq!(cache.retrieve("kEsTrEl").unwrap().unwrap().name, "Kestrel");
        }

        it "returns None when nothing matches" {
            cache.populate();
            assert_eq!(cache.retrieve("Albatross"), Ok(None));
        }

        it "reports ambiguity instead of picking one" {
            let kestrel = fleet().remove(0);
            let mut other = kestrel.clone();
            other.price = 1.0;
            cache.add(kestrel);
            cache.add(other);

            assert_eq!(
                cache.retrieve("Kestrel"),
                Err(CacheError::Ambiguous { name: "Kestrel".to_string(), count: 2 })
            );
        }
    }

    describe "cached_objects" {
        it "returns a snapshot" {
            cache.populate();
            let snapshot = cache.cached_objects();
            cache.clear();

            assert_eq!(snapshot.len(), 3);
            assert!(cache.is_empty());
        }
    }

    describe "save" {
        it "creates a new entity and caches it" {
            let albatross = Launcher::new("Albatross", 90000.0);

            assert!(cache.save(&albatross));

            assert!(repo.retrieve("Albatross").unwrap().is_some());
            assert_eq!(cache.retrieve("Albatross").unwrap(), Some(&albatross));
        }

        it "overwrites an existing entity and replaces the cached copy" {
            cache.populate();
            let mut kestrel = cache.retrieve("Kestrel").unwrap().unwrap().clone();
            kestrel.price = 210000.0;

            assert!(cache.save(&kestrel));

            assert_eq!(cache.len(), 3);
            assert_eq!(cache.retrieve("Kestrel").unwrap().unwrap().price, 210000.0);
            assert_eq!(repo.retrieve("Kestrel").unwrap().unwrap().price, 210000.0);
        }

        it "reports and returns false when storage refuses" {
            assert!(!cache.save(&Launcher::new("..", 1.0)));
            assert_eq!(reporter.len(), 1);
        }
    }

    describe "delete" {
        it "removes from storage and cache" {
            cache.populate();

            assert!(cache.delete("Condor"));

            assert!(repo.retrieve("Condor").unwrap().is_none());
            assert!(cache.retrieve("Condor").unwrap().is_none());
        }

        it "deletes by name in any case" {
            cache.populate();

            assert!(cache.delete("condor"));

            assert!(!repo.directory_for("Condor").exists());
            assert!(cache.retrieve("Condor").unwrap().is_none());
            assert_eq!(cache.len(), 2);
        }
    }

    describe "vehicle families" {
        before {
            let family_repo: FileRepository<VehicleFamily> = FileRepository::new(dir.path().join("VehicleFamilies"));
            let mut raptor = VehicleFamily::new("Raptor");
            let mut block_one = LauncherCollection::new("Block I");
            block_one.add_launchers(fleet());
            raptor.add_collection(block_one);
            let mut harrier = VehicleFamily::new("Harrier");
            harrier.add_launcher(Launcher::new("Harrier Light", 50000.0));
            family_repo.create(&raptor).expect("Failed to seed family");
            family_repo.create(&harrier).expect("Failed to seed family");
            let mut families: VehicleFamilyCache = Cache::new(family_repo, reporter.clone());
            families.populate();
        }

        it "finds the families holding a launcher" {
            let owners = families.families_containing("condor");
            assert_eq!(owners.len(), 1);
            assert_eq!(owners[0].name, "Raptor");

            assert_eq!(families.families_containing("Harrier Light")[0].name, "Harrier");
            assert!(families.families_containing("Albatross").is_empty());
        }

        it "summarises every family" {
            let summaries = families.summaries();
            assert_eq!(summaries.len(), 2);
            assert_eq!(summaries["Raptor"].number_of_versions, 3);
            assert_eq!(summaries["Harrier"].number_of_versions, 1);
        }
    }
}
