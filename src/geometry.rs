//! UV rectangle mapping for cladding textures.
//!
//! A cladding texture declares its physical size in meters. A face's UV
//! footprint is expressed in the same physical units, so placing the texture
//! at real-world scale is a division: a face spanning `W x H` meters covered
//! by a `w x h` meter texture tiles it `W/w` times horizontally and `H/h`
//! times vertically.

use glam::Vec2;

/// An axis-aligned rectangle in UV space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
}

impl UvRect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// A zero-size rectangle at the origin.
    pub fn zero() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::ZERO,
        }
    }

    /// The bounding rectangle of a set of UV coordinates.
    pub fn bounding(uvs: &[Vec2]) -> Self {
        if uvs.is_empty() {
            return Self::zero();
        }
        let mut min = uvs[0];
        let mut max = uvs[0];
        for uv in &uvs[1..] {
            min = min.min(*uv);
            max = max.max(*uv);
        }
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Whether the rectangle has no usable area.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Compute the UV rectangle that reproduces a cladding texture at
/// real-world scale over a face.
///
/// `face_rect` is the face's physical footprint in meters; `tex_width_m`
/// and `tex_height_m` are the texture's physical dimensions. The result is
/// anchored at the origin and spans `[0, W/w] x [0, H/h]`, so one texture
/// tile corresponds to exactly `w x h` meters of face surface. A texture
/// larger than the face yields a partial tile (coordinates below 1); a
/// degenerate face or non-positive texture size yields a zero rectangle
/// rather than a division error.
pub fn compute_cladding_uvs(face_rect: &UvRect, tex_width_m: f32, tex_height_m: f32) -> UvRect {
    if face_rect.is_degenerate() || tex_width_m <= 0.0 || tex_height_m <= 0.0 {
        return UvRect::zero();
    }

    UvRect::new(
        Vec2::ZERO,
        Vec2::new(
            (face_rect.width() / tex_width_m).max(0.0),
            (face_rect.height() / tex_height_m).max(0.0),
        ),
    )
}

/// Per-vertex variant of [`compute_cladding_uvs`].
///
/// Translates the face footprint to its minimum corner and scales every
/// coordinate by the reciprocal texture size, preserving the face's shape
/// within the tiled texture space. Used when writing a face's UV layer.
pub fn cladding_uvs(uvs: &[Vec2], tex_width_m: f32, tex_height_m: f32) -> Vec<Vec2> {
    let rect = UvRect::bounding(uvs);
    if rect.is_degenerate() || tex_width_m <= 0.0 || tex_height_m <= 0.0 {
        return vec![Vec2::ZERO; uvs.len()];
    }

    uvs.iter()
        .map(|uv| {
            Vec2::new(
                (uv.x - rect.min.x) / tex_width_m,
                (uv.y - rect.min.y) / tex_height_m,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit_is_single_tile() {
        let face = UvRect::new(Vec2::ZERO, Vec2::new(3.0, 2.0));
        let rect = compute_cladding_uvs(&face, 3.0, 2.0);
        assert_eq!(rect, UvRect::new(Vec2::ZERO, Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_tiling() {
        // 12m x 6m face, 3m x 2m texture: 4 x 3 tiles
        let face = UvRect::new(Vec2::new(5.0, 1.0), Vec2::new(17.0, 7.0));
        let rect = compute_cladding_uvs(&face, 3.0, 2.0);
        assert_eq!(rect.max, Vec2::new(4.0, 3.0));
        assert_eq!(rect.min, Vec2::ZERO);
    }

    #[test]
    fn test_texture_larger_than_face() {
        let face = UvRect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let rect = compute_cladding_uvs(&face, 4.0, 2.0);
        assert_eq!(rect.max, Vec2::new(0.25, 0.5));
        assert!(rect.max.x >= rect.min.x && rect.max.y >= rect.min.y);
    }

    #[test]
    fn test_degenerate_face() {
        let face = UvRect::new(Vec2::ZERO, Vec2::new(0.0, 5.0));
        let rect = compute_cladding_uvs(&face, 3.0, 2.0);
        assert_eq!(rect, UvRect::zero());

        // Zero texture size must not divide by zero either
        let face = UvRect::new(Vec2::ZERO, Vec2::new(5.0, 5.0));
        assert_eq!(compute_cladding_uvs(&face, 0.0, 2.0), UvRect::zero());
    }

    #[test]
    fn test_per_vertex_uvs() {
        let uvs = vec![
            Vec2::new(2.0, 1.0),
            Vec2::new(8.0, 1.0),
            Vec2::new(8.0, 5.0),
            Vec2::new(2.0, 5.0),
        ];
        let mapped = cladding_uvs(&uvs, 3.0, 2.0);
        assert_eq!(mapped[0], Vec2::ZERO);
        assert_eq!(mapped[1], Vec2::new(2.0, 0.0));
        assert_eq!(mapped[2], Vec2::new(2.0, 2.0));
        assert_eq!(mapped[3], Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_per_vertex_degenerate() {
        let uvs = vec![Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)];
        let mapped = cladding_uvs(&uvs, 3.0, 2.0);
        assert_eq!(mapped, vec![Vec2::ZERO; 3]);
    }

    #[test]
    fn test_bounding() {
        let uvs = vec![Vec2::new(3.0, -1.0), Vec2::new(1.0, 4.0)];
        let rect = UvRect::bounding(&uvs);
        assert_eq!(rect.min, Vec2::new(1.0, -1.0));
        assert_eq!(rect.max, Vec2::new(3.0, 4.0));
        assert!(UvRect::bounding(&[]).is_degenerate());
    }
}
