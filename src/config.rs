use std::path::PathBuf;

use cgmath::Vector2;

pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;

pub const VERTEX_SHADER_PATH: &str = "shaders/vertex.vert";
pub const FRAGMENT_SHADER_PATH: &str = "fragment.frag";

/// Fixed startup settings. Window size and shader paths are compiled in.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_version: (u8, u8),
    pub vsync: bool,
    pub vertex_path: PathBuf,
    pub fragment_path: PathBuf,
}

impl Config {
    pub fn logical_size(&self) -> Vector2<f32> {
        Vector2::new(self.width as f32, self.height as f32)
    }

    /// Device pixels handed to the `resolution` uniform.
    pub fn resolution(&self) -> Vector2<f32> {
        self.logical_size() * 2.0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: String::from("Patater Shader Kit"),
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            gl_version: (4, 1),
            vsync: true,
            vertex_path: PathBuf::from(VERTEX_SHADER_PATH),
            fragment_path: PathBuf::from(FRAGMENT_SHADER_PATH),
        }
    }
}
