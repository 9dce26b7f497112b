use std::sync::Arc;

use launch_catalog::catalog::Catalog;
use launch_catalog::config::Settings;
use launch_catalog::models::*;
use launch_catalog::report::SilentReporter;
use speculate2::speculate;

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let settings = Settings::with_root(dir.path());
        let mut catalog = Catalog::open(settings.clone(), Arc::new(SilentReporter));
    }

    it "stores each kind under its own location" {
        assert!(catalog.launchers_mut().save(&Launcher::new("Kestrel", 221000.0)));
        assert!(catalog.payloads_mut().save(&Payload::new("Relay Sat", 1.2, 3.0, 2.1)));

        assert!(dir.path().join("Launchers/Kestrel/Kestrel.json").is_file());
        assert!(dir.path().join("Payloads/Relay Sat/Relay Sat.json").is_file());
    }

    it "reloads everything a previous session saved" {
        let mut block = LauncherCollection::new("Block I");
        block.add_launcher(Launcher::new("Kestrel", 221000.0));
        let mut family = VehicleFamily::new("Raptor");
        family.add_collection(block.clone());

        catalog.launchers_mut().save(&Launcher::new("Kestrel", 221000.0));
        catalog.collections_mut().save(&block);
        catalog.families_mut().save(&family);
        catalog.payloads_mut().save(&Payload::new("Relay Sat", 1.2, 3.0, 2.1));

        let mut reopened = Catalog::open(settings, Arc::new(SilentReporter));
        assert_eq!(reopened.populate_all(), 4);

        let stored = reopened.families().retrieve("raptor").unwrap().unwrap();
        assert_eq!(stored, &family);
        assert_eq!(stored.summary().number_of_versions, 1);
    }

    it "forgets unsaved entries on refresh" {
        catalog.launchers_mut().save(&Launcher::new("Kestrel", 221000.0));
        catalog.populate_all();
        catalog.launchers_mut().add(Launcher::new("Draft", 1.0));
        assert_eq!(catalog.launchers().len(), 2);

        assert_eq!(catalog.refresh_all(), 1);
        assert!(catalog.launchers().retrieve("Draft").unwrap().is_none());
    }

    it "creates default settings on first use" {
        let path = dir.path().join("config").join("settings.json");
        let loaded = Settings::load_or_create(&path).expect("Failed to load settings");

        assert!(path.is_file());
        assert_eq!(loaded.vehicle_family_location, "VehicleFamilies");
    }
}
