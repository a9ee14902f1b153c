use crate::math::{Point3, Vector3};
use crate::tessellation::Triangle3d;

use super::Segment3;

/// A triangular panel of the working mesh.
///
/// Panels own their vertex positions; node indices are derived whenever
/// the node array is rebuilt from the panels, and vertex positions are
/// snapped onto the canonical node positions at that point.
#[derive(Debug, Clone)]
pub struct Panel3 {
    vertices: [Point3; 3],
    node_indices: [Option<usize>; 3],
    normal: Vector3,
    area: f64,
}

impl Panel3 {
    /// Creates a panel from three vertices.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        let mut panel = Self {
            vertices: [a, b, c],
            node_indices: [None; 3],
            normal: Vector3::zeros(),
            area: 0.0,
        };
        panel.set_frame();
        panel
    }

    /// Creates a panel from a tessellation triangle.
    #[must_use]
    pub fn from_triangle(t: &Triangle3d) -> Self {
        Self::new(t.vertices[0], t.vertices[1], t.vertices[2])
    }

    /// Recomputes the cached normal and area from the vertices.
    pub fn set_frame(&mut self) {
        let [a, b, c] = &self.vertices;
        let cross = (b - a).cross(&(c - a));
        let norm = cross.norm();
        self.area = 0.5 * norm;
        self.normal = if norm > f64::MIN_POSITIVE {
            cross / norm
        } else {
            Vector3::zeros()
        };
    }

    /// Vertex position `i` (0..3).
    #[must_use]
    pub fn vertex(&self, i: usize) -> &Point3 {
        &self.vertices[i]
    }

    /// Moves vertex `i` and refreshes the frame.
    pub fn set_vertex(&mut self, i: usize, point: Point3) {
        self.vertices[i] = point;
        self.set_frame();
    }

    /// Node index of vertex `i`, if the node array has been built.
    #[must_use]
    pub fn node_index(&self, i: usize) -> Option<usize> {
        self.node_indices[i]
    }

    /// Assigns the node index of vertex `i`.
    pub fn set_node_index(&mut self, i: usize, node: usize) {
        self.node_indices[i] = Some(node);
    }

    /// Clears all node indices.
    pub fn clear_node_indices(&mut self) {
        self.node_indices = [None; 3];
    }

    /// Panel normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Panel area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Whether the panel has collapsed to (numerically) zero area.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.area < 1e-12
    }

    /// Edge `i` of the panel, from vertex `i` to vertex `(i + 1) % 3`.
    #[must_use]
    pub fn edge(&self, i: usize) -> Segment3 {
        Segment3::new(self.vertices[i], self.vertices[(i + 1) % 3])
    }

    /// The XZ-mirrored copy of this panel, with reversed winding so its
    /// normal is the mirror image of the original.
    #[must_use]
    pub fn xz_symmetric(&self) -> Self {
        let m = |p: &Point3| Point3::new(p.x, -p.y, p.z);
        Self::new(m(&self.vertices[0]), m(&self.vertices[2]), m(&self.vertices[1]))
    }

    /// Translates the panel in place.
    pub fn translate(&mut self, d: &Vector3) {
        for v in &mut self.vertices {
            *v += d;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn frame_is_computed_on_creation() {
        let panel = Panel3::new(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(0.0, 2.0, 0.0));
        assert!((panel.area() - 2.0).abs() < 1e-12);
        assert!(panel.normal().z > 0.99);
    }

    #[test]
    fn xz_symmetric_mirrors_the_normal() {
        let panel = Panel3::new(p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 1.0));
        let mirrored = panel.xz_symmetric();
        assert!((mirrored.vertex(0).y + 1.0).abs() < 1e-12);
        assert!((panel.normal().y + mirrored.normal().y).abs() < 1e-12);
        assert!((panel.normal().x - mirrored.normal().x).abs() < 1e-12);
        assert!((panel.area() - mirrored.area()).abs() < 1e-12);
    }

    #[test]
    fn collapsed_panel_is_null() {
        let mut panel = Panel3::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        panel.set_vertex(2, p(0.5, 0.0, 0.0));
        assert!(panel.is_null());
    }
}
