use std::ffi::{c_char, CStr};

use gl::types::GLenum;

use crate::geometry::Geometry;
use crate::program::Program;

pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    pub fn use_program(&mut self, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            program.bind();
            self.current_program = p_id;
        }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        self.use_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::DrawArrays(
                geometry.primitive().gl_enum(),
                0,
                geometry.vertices() as i32,
            );
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        let (width, height) = viewport_extent(width, height);

        unsafe {
            gl::Viewport(0, 0, width, height);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    /// State for drawing flat, opaque, clockwise-wound triangles with no
    /// depth attachment.
    pub fn configure_flat_pipeline(&self) {
        unsafe {
            gl::Enable(gl::CULL_FACE);
            gl::CullFace(gl::BACK);
            gl::FrontFace(gl::CW);

            gl::Disable(gl::DEPTH_TEST);
            gl::Disable(gl::BLEND);

            gl::ClearColor(0.0, 0.0, 0.0, 0.0);
        }
    }
}

fn viewport_extent(width: u32, height: u32) -> (i32, i32) {
    let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);

    (clamp(width), clamp(height))
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct GlInfo {
    pub renderer: String,
    pub version: String,
    pub shading_language_version: String,
}

impl GlInfo {
    pub fn query() -> Self {
        Self {
            renderer: gl_string(gl::RENDERER),
            version: gl_string(gl::VERSION),
            shading_language_version: gl_string(gl::SHADING_LANGUAGE_VERSION),
        }
    }
}

fn gl_string(name: GLenum) -> String {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return String::from("<unavailable>");
        }

        CStr::from_ptr(ptr as *const c_char)
            .to_string_lossy()
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_covers_physical_size() {
        assert_eq!(viewport_extent(1280, 960), (1280, 960));
        assert_eq!(viewport_extent(0, 1), (0, 1));
        assert_eq!(viewport_extent(u32::MAX, 480), (i32::MAX, 480));
    }
}
