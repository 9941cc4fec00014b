//! Deterministic categorical instance generators shared by integration tests
//! and benchmarks. Generated in code rather than loaded from files so the
//! fixtures need no I/O.

use cobweb_core::Instance;

/// Small hand-built mushroom-style dataset: two well-separated classes with
/// a little overlap in cap color.
pub fn mushrooms() -> Vec<Instance> {
    let rows: &[(&str, &str, &str, &str)] = &[
        // (cap, odor, gills, edible)
        ("brown", "none", "broad", "yes"),
        ("brown", "none", "broad", "yes"),
        ("white", "almond", "broad", "yes"),
        ("white", "none", "broad", "yes"),
        ("brown", "almond", "narrow", "yes"),
        ("red", "foul", "narrow", "no"),
        ("red", "foul", "narrow", "no"),
        ("red", "pungent", "narrow", "no"),
        ("white", "foul", "narrow", "no"),
        ("brown", "pungent", "narrow", "no"),
        ("red", "foul", "broad", "no"),
        ("white", "almond", "broad", "yes"),
    ];
    rows.iter()
        .map(|(cap, odor, gills, edible)| {
            Instance::new()
                .with("cap", *cap)
                .with("odor", *odor)
                .with("gills", *gills)
                .with("edible", *edible)
        })
        .collect()
}

/// `n` single-attribute instances cycling over the given colors.
pub fn color_stream(n: usize, colors: &[&str]) -> Vec<Instance> {
    (0..n)
        .map(|i| Instance::new().with("color", colors[i % colors.len()]))
        .collect()
}

/// Two clearly separated clusters, `per_cluster` instances each: one all-red
/// small items, one all-blue large items.
pub fn two_clusters(per_cluster: usize) -> Vec<Instance> {
    let mut instances = Vec::with_capacity(per_cluster * 2);
    for i in 0..per_cluster * 2 {
        let instance = if i % 2 == 0 {
            Instance::new().with("color", "red").with("size", "small")
        } else {
            Instance::new().with("color", "blue").with("size", "large")
        };
        instances.push(instance);
    }
    instances
}
