//! Collision-mask bundle
//!
//! One `AssetBundle` is constructed at process start and passed by reference
//! into the simulation and the session controller; there is no ambient global
//! asset state. Entities carry a `SpriteId` and resolve it against the bundle,
//! so a laser's mask reference never changes after spawn.
//!
//! The built-in masks are procedural silhouettes matching the shipped sprite
//! dimensions (125x125 player, 100x100 enemies). A directory of text-format
//! mask files can override them; a bad override file is fatal at startup.

use std::io;
use std::path::Path;

use crate::sim::mask::SpriteMask;

/// Every sprite the collision engine can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    PlayerShip,
    EnemyCat,
    EnemyRaccoon,
    EnemyFox,
    PlayerLaser,
    EnemyLaser,
}

impl SpriteId {
    pub const ALL: [SpriteId; 6] = [
        SpriteId::PlayerShip,
        SpriteId::EnemyCat,
        SpriteId::EnemyRaccoon,
        SpriteId::EnemyFox,
        SpriteId::PlayerLaser,
        SpriteId::EnemyLaser,
    ];

    /// File stem used for on-disk mask overrides.
    pub fn file_stem(self) -> &'static str {
        match self {
            SpriteId::PlayerShip => "ship",
            SpriteId::EnemyCat => "cat",
            SpriteId::EnemyRaccoon => "raccoon",
            SpriteId::EnemyFox => "fox",
            SpriteId::PlayerLaser => "laser_yellow",
            SpriteId::EnemyLaser => "laser_blue",
        }
    }
}

/// All collision masks, resolved by `SpriteId`.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    player: SpriteMask,
    cat: SpriteMask,
    raccoon: SpriteMask,
    fox: SpriteMask,
    player_laser: SpriteMask,
    enemy_laser: SpriteMask,
}

impl AssetBundle {
    /// Procedural silhouettes at the shipped sprite sizes.
    pub fn builtin() -> Self {
        Self {
            player: ship_silhouette(125),
            cat: saucer_silhouette(100, 0.55),
            raccoon: saucer_silhouette(100, 0.65),
            fox: saucer_silhouette(100, 0.45),
            player_laser: bolt_silhouette(20, 56),
            enemy_laser: bolt_silhouette(20, 56),
        }
    }

    pub fn mask(&self, id: SpriteId) -> &SpriteMask {
        match id {
            SpriteId::PlayerShip => &self.player,
            SpriteId::EnemyCat => &self.cat,
            SpriteId::EnemyRaccoon => &self.raccoon,
            SpriteId::EnemyFox => &self.fox,
            SpriteId::PlayerLaser => &self.player_laser,
            SpriteId::EnemyLaser => &self.enemy_laser,
        }
    }

    fn mask_mut(&mut self, id: SpriteId) -> &mut SpriteMask {
        match id {
            SpriteId::PlayerShip => &mut self.player,
            SpriteId::EnemyCat => &mut self.cat,
            SpriteId::EnemyRaccoon => &mut self.raccoon,
            SpriteId::EnemyFox => &mut self.fox,
            SpriteId::PlayerLaser => &mut self.player_laser,
            SpriteId::EnemyLaser => &mut self.enemy_laser,
        }
    }

    /// Replace built-in masks with any `<stem>.mask` files found in `dir`.
    /// Missing files keep the built-in; unparseable files are an error so a
    /// broken install fails before the session starts.
    pub fn load_overrides(&mut self, dir: &Path) -> io::Result<()> {
        for id in SpriteId::ALL {
            let path = dir.join(format!("{}.mask", id.file_stem()));
            if !path.exists() {
                continue;
            }
            let text = std::fs::read_to_string(&path)?;
            let rows: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
            let mask = SpriteMask::from_rows(&rows)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            log::info!(
                "mask override {:?} <- {} ({}x{})",
                id,
                path.display(),
                mask.width(),
                mask.height()
            );
            *self.mask_mut(id) = mask;
        }
        Ok(())
    }
}

/// Upward-pointing triangular ship silhouette.
fn ship_silhouette(size: u32) -> SpriteMask {
    let s = size as i32;
    let cx = s / 2;
    let mut cells = Vec::with_capacity((size * size) as usize);
    for y in 0..s {
        let half_width = y / 2;
        for x in 0..s {
            cells.push((x - cx).abs() <= half_width);
        }
    }
    SpriteMask::from_cells(size, size, &cells)
}

/// Elliptical saucer silhouette, vertically centered. `squish` is the ratio
/// of the vertical to the horizontal radius; variants differ only here.
fn saucer_silhouette(size: u32, squish: f32) -> SpriteMask {
    let s = size as i32;
    let cx = (s - 1) as f32 / 2.0;
    let cy = (s - 1) as f32 / 2.0;
    let rx = cx;
    let ry = (rx * squish).max(1.0);
    let mut cells = Vec::with_capacity((size * size) as usize);
    for y in 0..s {
        for x in 0..s {
            let nx = (x as f32 - cx) / rx;
            let ny = (y as f32 - cy) / ry;
            cells.push(nx * nx + ny * ny <= 1.0);
        }
    }
    SpriteMask::from_cells(size, size, &cells)
}

/// Vertical laser bolt: a bar with tapered ends.
fn bolt_silhouette(width: u32, height: u32) -> SpriteMask {
    let w = width as i32;
    let h = height as i32;
    let cx = (w - 1) as f32 / 2.0;
    let full = w as f32 / 2.0;
    let taper = (h / 6).max(1);
    let mut cells = Vec::with_capacity((width * height) as usize);
    for y in 0..h {
        let edge = y.min(h - 1 - y);
        let half = if edge < taper {
            full * (edge + 1) as f32 / (taper + 1) as f32
        } else {
            full
        };
        for x in 0..w {
            cells.push((x as f32 - cx).abs() < half);
        }
    }
    SpriteMask::from_cells(width, height, &cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_masks_have_shipped_dimensions() {
        let assets = AssetBundle::builtin();
        assert_eq!(assets.mask(SpriteId::PlayerShip).width(), 125);
        assert_eq!(assets.mask(SpriteId::PlayerShip).height(), 125);
        for id in [SpriteId::EnemyCat, SpriteId::EnemyRaccoon, SpriteId::EnemyFox] {
            assert_eq!(assets.mask(id).width(), 100);
            assert_eq!(assets.mask(id).height(), 100);
        }
        assert_eq!(assets.mask(SpriteId::PlayerLaser).height(), 56);
    }

    #[test]
    fn builtin_masks_are_nonempty_and_nonrectangular() {
        let assets = AssetBundle::builtin();
        for id in SpriteId::ALL {
            let m = assets.mask(id);
            let area = m.width() * m.height();
            assert!(m.pixel_count() > 0, "{id:?} is empty");
            assert!(m.pixel_count() < area, "{id:?} is a full rectangle");
        }
    }

    #[test]
    fn override_replaces_builtin_mask() {
        let dir = std::env::temp_dir().join(format!("pixel_raiders_masks_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("ship.mask"), "###\n.#.\n").unwrap();
        let mut assets = AssetBundle::builtin();
        assets.load_overrides(&dir).unwrap();
        assert_eq!(assets.mask(SpriteId::PlayerShip).width(), 3);
        assert_eq!(assets.mask(SpriteId::PlayerShip).pixel_count(), 4);
        // Non-overridden sprites keep the builtin
        assert_eq!(assets.mask(SpriteId::EnemyCat).width(), 100);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn corrupt_override_is_fatal() {
        let dir = std::env::temp_dir().join(format!("pixel_raiders_badmask_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("cat.mask"), "#?\n").unwrap();
        let mut assets = AssetBundle::builtin();
        let err = assets.load_overrides(&dir).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        std::fs::remove_dir_all(&dir).ok();
    }
}
