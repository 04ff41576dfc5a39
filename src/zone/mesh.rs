use crate::error::{ParticleError, Result};
use crate::math::SimRng;
use glam::Vec3;
use rand::Rng;

/// Spawns on the vertices of a mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshZone {
    vertices: Vec<Vec3>,
    pub scale: f32,
}

impl MeshZone {
    /// Build from a vertex list. Fails when the list is empty.
    pub fn new(vertices: Vec<Vec3>, scale: f32) -> Result<Self> {
        if vertices.is_empty() {
            return Err(ParticleError::EmptyMesh("vertex list is empty".into()));
        }
        Ok(Self { vertices, scale })
    }

    /// Build from a flat `[x, y, z, x, y, z, ...]` position buffer.
    pub fn from_flat_positions(positions: &[f32], scale: f32) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(ParticleError::EmptyMesh(format!(
                "position buffer length {} is not a multiple of 3",
                positions.len()
            )));
        }
        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        Self::new(vertices, scale)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// A uniformly picked vertex, scaled.
    pub fn sample(&self, rng: &mut SimRng) -> Vec3 {
        self.vertices[rng.gen_range(0..self.vertices.len())] * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_empty_mesh_fails() {
        assert!(matches!(
            MeshZone::new(vec![], 1.0),
            Err(ParticleError::EmptyMesh(_))
        ));
        assert!(MeshZone::from_flat_positions(&[], 1.0).is_err());
        assert!(MeshZone::from_flat_positions(&[1.0, 2.0], 1.0).is_err());
    }

    #[test]
    fn test_samples_are_scaled_vertices() {
        let mut rng = SimRng::seed_from_u64(5);
        let zone =
            MeshZone::from_flat_positions(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0], 2.0).unwrap();
        for _ in 0..50 {
            let p = zone.sample(&mut rng);
            assert!(p == Vec3::new(2.0, 0.0, 0.0) || p == Vec3::new(0.0, 2.0, 0.0));
        }
    }
}
