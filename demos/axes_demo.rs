//! Demo showing axes marker generation.
//!
//! Builds a few axes variants, prints their parameters and part sizes, and
//! loads one from a JSON configuration.
//!
//! Run with `RUST_LOG=debug cargo run --example axes_demo` to see template
//! rebuilds.

use vista::*;

fn describe(bounds: Option<Bounds>) -> String {
    bounds.map_or_else(|| "empty".to_string(), |b| b.to_string())
}

fn print_parts(output: &MultiBlock) {
    for (name, block) in output.iter() {
        if let Some(mesh) = block.as_mesh() {
            let bounds = describe(mesh.bounds());
            println!(
                "  {name:<8} {:>5} points {:>4} faces  bounds {bounds}",
                mesh.n_points(),
                mesh.n_faces()
            );
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    // Default axes: cylinder shafts and cone tips
    let mut axes = AxesGeometrySource::new();
    println!("{axes}");
    print_parts(&axes.output());

    // Per-axis shaft lengths with spherical tips
    axes.set_shaft_length([1.0, 2.0, 3.0])?;
    axes.set_tip_type(GeometryKind::Sphere)?;
    axes.set_tip_radius(0.15)?;
    println!("\nlong shafts, sphere tips:");
    print_parts(&axes.output());

    // Mirrored axes extending into negative coordinates
    axes.set_symmetric(true);
    let symmetric = axes.output();
    println!("\nsymmetric, overall bounds {}", describe(symmetric.bounds()));

    // Custom tip geometry from a volume mesh
    let tet = VolumeMesh::new_tet_mesh(
        vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::Z,
        ],
        vec![[0, 1, 2, 3]],
    )?;
    axes.set_tip_type(DataSet::from(tet))?;
    println!("\ncustom tip type: '{}'", axes.tip_type());

    // Configuration from JSON
    let config = AxesGeometryConfig::from_json(
        r#"{ "shaft_type": "cube", "tip_type": "pyramid", "symmetric_bounds": true }"#,
    )?;
    let mut from_json = AxesGeometrySource::from_config(&config)?;
    let merged = from_json.output().combine(true, 1e-6)?;
    println!(
        "\nfrom JSON: {} points, {} faces after merging, bounds {}",
        merged.n_points(),
        merged.n_faces(),
        describe(merged.bounds())
    );

    Ok(())
}
