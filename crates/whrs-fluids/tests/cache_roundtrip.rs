use std::fs;
use whrs_fluids::{
    CachePolicy, CountingEngine, FluidResult, PropKey, PropertyCache, PropertyEngine, PropertyQuery,
};

struct Quadratic;

impl PropertyEngine for Quadratic {
    fn name(&self) -> &str {
        "quadratic"
    }

    fn compute(&self, query: &PropertyQuery) -> FluidResult<f64> {
        Ok(match query {
            PropertyQuery::Trivial { .. } => 553.6,
            PropertyQuery::State { value1, value2, .. } => {
                value1.get() * value1.get() / 7.0 + value2.get().sqrt()
            }
        })
    }
}

fn queries() -> Vec<PropertyQuery> {
    vec![
        PropertyQuery::trivial(PropKey::Tcrit, "Cyclohexane"),
        PropertyQuery::state(PropKey::H, PropKey::T, 369.15, PropKey::P, 315_000.0, "Water"),
        PropertyQuery::state(PropKey::S, PropKey::T, 0.1 + 0.2, PropKey::P, 1e5 / 3.0, "Water"),
        PropertyQuery::state(PropKey::T, PropKey::P, 20_000.0, PropKey::Q, 1.0, "Water"),
    ]
}

#[test]
fn persisted_entries_are_reused_by_a_fresh_cache() {
    let path = std::env::temp_dir().join("whrs_fluids_cache_roundtrip.json");
    let _ = fs::remove_file(&path);

    let mut first =
        PropertyCache::new(CountingEngine::new(Quadratic), CachePolicy::File(path.clone())).unwrap();
    let expected: Vec<f64> = queries().iter().map(|q| first.lookup(q).unwrap()).collect();
    assert_eq!(first.engine().calls(), 4);
    first.save().unwrap();

    let mut second =
        PropertyCache::new(CountingEngine::new(Quadratic), CachePolicy::File(path.clone())).unwrap();
    assert_eq!(second.len(), 4);
    let reloaded: Vec<f64> = queries().iter().map(|q| second.lookup(q).unwrap()).collect();

    assert_eq!(second.engine().calls(), 0);
    for (a, b) in expected.iter().zip(&reloaded) {
        assert_eq!(a.to_bits(), b.to_bits());
    }

    let _ = fs::remove_file(&path);
}

#[test]
fn memory_policy_does_not_write() {
    let path = std::env::temp_dir().join("whrs_fluids_cache_memory_only.json");
    let _ = fs::remove_file(&path);

    let mut cache = PropertyCache::new(Quadratic, CachePolicy::Memory).unwrap();
    for q in queries() {
        cache.lookup(&q).unwrap();
    }
    cache.save().unwrap();
    assert!(!path.exists());
}
