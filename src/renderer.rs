use gl_wrapper::geometry::Geometry;
use gl_wrapper::program::UniformSink;
use gl_wrapper::renderer::GlRenderer;

use crate::frame::FrameState;
use crate::loader::{Bindings, ShaderProgram};

/// Pushes the frame state into whichever optional uniforms the shader
/// declared. Absent uniforms are never touched.
pub fn upload_uniforms<S: UniformSink>(bindings: &Bindings, frame: &FrameState, sink: &mut S) {
    if let Some(location) = bindings.resolution {
        sink.set_vec2(location, frame.resolution.into());
    }

    if let Some(location) = bindings.time {
        sink.set_f32(location, frame.time);
    }

    if let Some(location) = bindings.frame {
        sink.set_u32(location, frame.frame);
    }

    if let Some(location) = bindings.mouse {
        sink.set_vec2(location, frame.mouse.into());
    }
}

pub struct FrameRenderer {
    gl: GlRenderer,
}

impl FrameRenderer {
    /// `width` and `height` are the surface size in physical pixels.
    pub fn new(width: u32, height: u32) -> Self {
        let gl = GlRenderer::default();
        gl.configure_flat_pipeline();
        gl.resize(width, height);

        Self { gl }
    }

    /// Draws one frame into the back buffer. Presenting is up to the caller.
    pub fn render_frame(
        &mut self,
        shader: &mut ShaderProgram,
        mesh: &Geometry,
        frame: &mut FrameState,
    ) {
        self.gl.clear_color(0.0, 0.0, 0.0, 0.0);

        self.gl.use_program(&shader.program);
        upload_uniforms(&shader.bindings, frame, &mut shader.program);
        self.gl.draw(mesh, &shader.program);

        frame.advance();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use cgmath::Vector2;
    use gl_wrapper::program::UniformLocation;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum Upload {
        Vec2(i32, [f32; 2]),
        F32(i32, f32),
        U32(i32, u32),
    }

    #[derive(Default)]
    struct RecordingSink {
        uploads: Vec<Upload>,
    }

    impl UniformSink for RecordingSink {
        fn set_vec2(&mut self, location: UniformLocation, value: [f32; 2]) {
            self.uploads.push(Upload::Vec2(location.raw(), value));
        }

        fn set_f32(&mut self, location: UniformLocation, value: f32) {
            self.uploads.push(Upload::F32(location.raw(), value));
        }

        fn set_u32(&mut self, location: UniformLocation, value: u32) {
            self.uploads.push(Upload::U32(location.raw(), value));
        }
    }

    fn bindings() -> Bindings {
        Bindings {
            position: 0,
            resolution: None,
            mouse: None,
            time: None,
            frame: None,
        }
    }

    fn frame_state() -> FrameState {
        let mut state = FrameState::new(Vector2::new(1280.0, 960.0), Instant::now());
        state.mouse = Vector2::new(0.25, 0.75);
        state.time = 1.5;
        state.frame = 42;
        state
    }

    #[test]
    fn no_uniforms_means_no_uploads() {
        let mut sink = RecordingSink::default();

        upload_uniforms(&bindings(), &frame_state(), &mut sink);

        assert!(sink.uploads.is_empty());
    }

    #[test]
    fn all_uniforms_receive_frame_state() {
        let bindings = Bindings {
            resolution: UniformLocation::new(0),
            mouse: UniformLocation::new(1),
            time: UniformLocation::new(2),
            frame: UniformLocation::new(3),
            ..bindings()
        };
        let mut sink = RecordingSink::default();

        upload_uniforms(&bindings, &frame_state(), &mut sink);

        assert_eq!(
            sink.uploads,
            vec![
                Upload::Vec2(0, [1280.0, 960.0]),
                Upload::F32(2, 1.5),
                Upload::U32(3, 42),
                Upload::Vec2(1, [0.25, 0.75]),
            ]
        );
    }

    #[test]
    fn only_declared_subset_is_touched() {
        let bindings = Bindings {
            mouse: UniformLocation::new(5),
            frame: UniformLocation::new(9),
            ..bindings()
        };
        let mut sink = RecordingSink::default();

        upload_uniforms(&bindings, &frame_state(), &mut sink);

        assert_eq!(
            sink.uploads,
            vec![Upload::U32(9, 42), Upload::Vec2(5, [0.25, 0.75])]
        );
    }
}
