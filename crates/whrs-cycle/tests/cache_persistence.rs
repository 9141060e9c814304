use std::fs;
use whrs_cycle::{OperatingPoint, WhrsEvaluator};
use whrs_fluids::{CachePolicy, CoolPropEngine, CountingEngine};

fn scenario() -> OperatingPoint {
    OperatingPoint {
        load: 60.0,
        jw_pump: 3.15,
        rc_superheat: 8.0222,
        rc_subcool: 1e-4,
        orc_superheat: 1e-3,
        orc_subcool: 1e-3,
        orc_pump: 6.6,
        p_chamber: 0.2,
        fluid: None,
    }
}

#[test]
fn reloaded_cache_needs_no_engine_calls() {
    let path = std::env::temp_dir().join("whrs_cycle_cache_persistence.json");
    let _ = fs::remove_file(&path);

    let mut first = WhrsEvaluator::new(
        CountingEngine::new(CoolPropEngine::new()),
        CachePolicy::File(path.clone()),
    )
    .unwrap();
    let expected = first.evaluate(&scenario()).unwrap();
    assert!(first.cache().engine().calls() > 0);
    assert!(path.exists());

    let mut second = WhrsEvaluator::new(
        CountingEngine::new(CoolPropEngine::new()),
        CachePolicy::File(path.clone()),
    )
    .unwrap();
    assert_eq!(second.cache().len(), first.cache().len());
    let reloaded = second.evaluate(&scenario()).unwrap();

    assert_eq!(second.cache().engine().calls(), 0);
    assert_eq!(expected, reloaded);

    let _ = fs::remove_file(&path);
}

#[test]
fn failed_evaluation_does_not_save() {
    let path = std::env::temp_dir().join("whrs_cycle_cache_failed_eval.json");
    let _ = fs::remove_file(&path);

    let mut ev = WhrsEvaluator::new(CoolPropEngine::new(), CachePolicy::File(path.clone())).unwrap();
    let bad = OperatingPoint {
        load: 120.0,
        ..scenario()
    };
    assert!(ev.evaluate(&bad).is_err());
    assert!(!path.exists());
}
