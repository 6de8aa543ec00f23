use serde::{Deserialize, Serialize};

/// A minimal PBR material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    #[serde(default)]
    pub metalness: f32,
}

fn default_roughness() -> f32 {
    0.8
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".into(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            roughness: default_roughness(),
            metalness: 0.0,
        }
    }
}

impl Material {
    fn builtin(name: &str, hex: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            name: name.into(),
            base_color: [
                ((hex >> 16) & 0xff) as f32 / 255.0,
                ((hex >> 8) & 0xff) as f32 / 255.0,
                (hex & 0xff) as f32 / 255.0,
                1.0,
            ],
            roughness,
            metalness,
        }
    }
}

/// Textured surfaces of the room shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Floor,
    Wall,
    Brick,
    Wood,
    Rug,
}

impl Surface {
    pub const ALL: [Surface; 5] = [
        Surface::Floor,
        Surface::Wall,
        Surface::Brick,
        Surface::Wood,
        Surface::Rug,
    ];

    /// Material used until, or instead of, a loaded descriptor.
    pub fn builtin(self) -> Material {
        match self {
            Surface::Floor => Material::builtin("polished_concrete", 0xdadada, 0.32, 0.08),
            Surface::Wall => Material::builtin("neutral_plaster", 0xf6f2ea, 0.9, 0.02),
            Surface::Brick => Material::builtin("warm_brick", 0xd6b19a, 0.7, 0.05),
            Surface::Wood => Material::builtin("light_wood", 0xd9c9b4, 0.6, 0.05),
            Surface::Rug => Material::builtin("rug", 0xcfd4d8, 0.95, 0.02),
        }
    }

    /// Descriptor files to try, most preferred first, relative to the
    /// material root.
    pub fn sources(self) -> Vec<String> {
        let names: &[&str] = match self {
            Surface::Floor => &["floor_concrete_pitted.json", "floor_hardwood.json"],
            Surface::Wall => &["wall_plaster_brushed.json", "wall_brick.json"],
            Surface::Brick => &["brick_clay_old.json", "wall_brick.json"],
            Surface::Wood => &["wood_larch_clapboard.json", "floor_hardwood.json"],
            Surface::Rug => &["rug_uv_grid.json"],
        };
        names.iter().map(|n| n.to_string()).collect()
    }
}
