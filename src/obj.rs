use std::fs::File;
use std::io::Read;

use crate::vector::Vec3;

/// Raw mesh geometry pulled from a Wavefront OBJ file: positions plus
/// triangle index triplets. Face normals are not read from the file; the
/// mesh derives them from the triangle edges.
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub indices: Vec<usize>,
}

/// Loads the triangle geometry of every object in an OBJ file. Non-triangle
/// primitives (points, lines) are skipped. Errors are reported as strings so
/// callers can log them and carry on with an empty mesh.
pub fn load_obj(path: &str) -> Result<MeshData, String> {
    let mut text = String::new();
    File::open(path)
        .map_err(|e| format!("could not open {}: {}", path, e))?
        .read_to_string(&mut text)
        .map_err(|e| format!("could not read {}: {}", path, e))?;

    let obj_set =
        wavefront_obj::obj::parse(text).map_err(|e| format!("could not parse {}: {:?}", path, e))?;

    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for object in &obj_set.objects {
        let base = positions.len();
        positions.extend(
            object
                .vertices
                .iter()
                .map(|v| Vec3::new(v.x, v.y, v.z)),
        );

        for geometry in &object.geometry {
            for shape in &geometry.shapes {
                if let wavefront_obj::obj::Primitive::Triangle(a, b, c) = shape.primitive {
                    indices.push(base + a.0);
                    indices.push(base + b.0);
                    indices.push(base + c.0);
                }
            }
        }
    }

    Ok(MeshData { positions, indices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_vertices_and_faces() {
        let path = write_temp_obj(
            "lumen_obj_quad_test.obj",
            "# quad\n\
             v -1.0 -1.0 0.0\n\
             v 1.0 -1.0 0.0\n\
             v 1.0 1.0 0.0\n\
             v -1.0 1.0 0.0\n\
             f 1 2 3\n\
             f 1 3 4\n",
        );

        let mesh = load_obj(path.to_str().unwrap()).unwrap();
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        // 1-based OBJ indices mapped to 0-based.
        assert_eq!(&mesh.indices[..3], &[0, 1, 2]);
        assert_eq!(mesh.positions[0], Vec3::new(-1.0, -1.0, 0.0));
    }

    #[test]
    fn missing_file_is_an_error_not_a_panic() {
        let result = load_obj("/nonexistent/lumen_bunny.obj");
        assert!(result.is_err());
    }
}
