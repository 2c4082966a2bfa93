use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::carousel::PANEL_COUNT;
use crate::options::SceneOptions;

/// Where everything in the scene sits.
///
/// Planets are evenly spaced on a ring inside a group. The group is tilted
/// about X, lowered on Y, and spun about its own Y axis by the carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    /// Ring radius of the planet group.
    pub ring_radius: f32,
    /// Planet sphere radius.
    pub planet_radius: f32,
    /// Planet sphere segments.
    pub planet_segments: u32,
    /// Group tilt about X, in radians.
    pub group_tilt: f32,
    /// Group offset on Y.
    pub group_offset_y: f32,
    /// Starfield sphere radius.
    pub background_radius: f32,
    /// Starfield sphere segments.
    pub background_segments: u32,
}

impl SceneLayout {
    /// Layout from scene options.
    #[must_use]
    pub fn from_options(options: &SceneOptions) -> Self {
        Self {
            ring_radius: options.ring_radius,
            planet_radius: options.planet_radius,
            planet_segments: options.planet_segments,
            group_tilt: options.group_tilt,
            group_offset_y: options.group_offset_y,
            background_radius: options.background_radius,
            background_segments: options.background_segments,
        }
    }

    /// Position of planet `i` in group space.
    #[must_use]
    pub fn planet_offset(&self, i: usize) -> Vec3 {
        let angle = i as f32 / PANEL_COUNT as f32 * TAU;
        Vec3::new(
            self.ring_radius * angle.cos(),
            0.0,
            self.ring_radius * angle.sin(),
        )
    }

    /// Group model matrix for a given Y rotation.
    ///
    /// Rotations compose X then Y (intrinsic), so the tilt stays fixed
    /// while the ring spins in its own plane.
    #[must_use]
    pub fn group_transform(&self, rotation_y: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.group_offset_y, 0.0))
            * Mat4::from_rotation_x(self.group_tilt)
            * Mat4::from_rotation_y(rotation_y)
    }

    /// World model matrix of every planet.
    #[must_use]
    pub fn planet_transforms(&self, rotation_y: f32) -> [Mat4; PANEL_COUNT] {
        let group = self.group_transform(rotation_y);
        std::array::from_fn(|i| {
            group * Mat4::from_translation(self.planet_offset(i))
        })
    }

    /// Starfield model matrix (centered on the origin).
    #[must_use]
    pub fn background_transform(&self) -> Mat4 {
        Mat4::IDENTITY
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self::from_options(&SceneOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn planets_are_a_quarter_turn_apart() {
        let layout = SceneLayout::default();
        assert_close(layout.planet_offset(0), Vec3::new(4.8, 0.0, 0.0));
        assert_close(layout.planet_offset(1), Vec3::new(0.0, 0.0, 4.8));
        assert_close(layout.planet_offset(2), Vec3::new(-4.8, 0.0, 0.0));
        assert_close(layout.planet_offset(3), Vec3::new(0.0, 0.0, -4.8));
    }

    #[test]
    fn untilted_group_only_translates() {
        let layout = SceneLayout {
            group_tilt: 0.0,
            ..SceneLayout::default()
        };
        let world = layout.planet_transforms(0.0)[0].transform_point3(Vec3::ZERO);
        assert_close(world, Vec3::new(4.8, -0.8, 0.0));
    }

    #[test]
    fn quarter_turn_brings_the_next_planet_forward() {
        let layout = SceneLayout {
            group_tilt: 0.0,
            ..SceneLayout::default()
        };
        // Planet 1 starts at +Z; a +π/2 turn about Y moves +Z to +X.
        let moved =
            layout.planet_transforms(FRAC_PI_2)[1].transform_point3(Vec3::ZERO);
        assert_close(moved, Vec3::new(4.8, -0.8, 0.0));
    }

    #[test]
    fn tilt_keeps_planets_on_the_ring() {
        let layout = SceneLayout::default();
        let center = Vec3::new(0.0, layout.group_offset_y, 0.0);
        for transform in layout.planet_transforms(0.7) {
            let p = transform.transform_point3(Vec3::ZERO);
            assert!(((p - center).length() - layout.ring_radius).abs() < 1e-4);
        }
    }

    #[test]
    fn background_is_centered() {
        let layout = SceneLayout::default();
        assert_eq!(layout.background_transform(), Mat4::IDENTITY);
    }
}
