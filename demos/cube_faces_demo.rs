//! Demo showing cube face generation.
//!
//! Shrinks, explodes and frames the faces of a box, then slices the result
//! with the three orthogonal planes.

use vista::*;

fn main() -> Result<()> {
    init_logging();

    let config = CubeFacesConfig::default()
        .with_lengths(2.0, 1.0, 1.0)
        .with_shrink_factor(0.8)
        .with_explode_factor(0.3)
        .with_names(&["right", "left", "front", "back", "top", "bottom"]);
    let mut faces = CubeFacesSource::from_config(&config)?;
    println!("{faces}");

    let output = faces.output();
    for (name, block) in output.iter() {
        if let Some(mesh) = block.as_mesh() {
            println!("  {name:<7} area {:.3}  center {}", mesh.area(), mesh.center());
        }
    }

    // Framed faces
    faces.set_frame_width(Some(0.25))?;
    let framed = faces.output();
    println!("\nframed: {} faces, {} points", framed.n_faces(), framed.n_points());

    // Outline where each orthogonal plane cuts the framed faces
    let mut planes = OrthogonalPlanesSource::new();
    for (plane_name, block) in planes.output().iter() {
        let Some(mesh) = block.as_mesh() else { continue };
        let normal = mesh.compute_face_normals()[0];
        let plane = Plane::new(mesh.center(), normal)?;
        let outline = framed.slice(&plane).combine(true, 1e-6)?;
        println!("  {plane_name}: {} segments", outline.n_lines());
    }

    Ok(())
}
