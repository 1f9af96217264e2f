use std::ffi::{c_char, CString};
use std::fmt;

use gl::types::{GLenum, GLint, GLuint};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
}

impl ShaderStage {
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
        }
    }

    pub fn gl_enum(&self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Geometry => gl::GEOMETRY_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sources are passed to the driver as raw bytes, only NUL is rejected.
pub struct ProgramBuilder<'a> {
    vert: &'a [u8],
    frag: &'a [u8],
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vert_src: &'a [u8], frag_src: &'a [u8]) -> Self {
        Self {
            vert: vert_src,
            frag: frag_src,
        }
    }

    pub fn build(self) -> Result<Program, PBError> {
        let vert =
            CString::new(self.vert).map_err(|_| PBError::InvalidSource(ShaderStage::Vertex))?;
        let frag =
            CString::new(self.frag).map_err(|_| PBError::InvalidSource(ShaderStage::Fragment))?;

        let vert = ShaderObject::compile(ShaderStage::Vertex, &vert)?;
        let frag = ShaderObject::compile(ShaderStage::Fragment, &frag)?;

        let mut success: GLint = 0;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert.id);
            gl::AttachShader(program, frag.id);
            gl::LinkProgram(program);

            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut GLint);
            if success != gl::TRUE as GLint {
                let log = program_info_log(program);
                gl::DeleteProgram(program);

                return Err(PBError::Linking {
                    program_id: program,
                    log,
                });
            }

            gl::DetachShader(program, vert.id);
            gl::DetachShader(program, frag.id);

            Ok(Program { id: program })
        }
    }
}

/// Compiled stage, deleted when dropped whether or not linking succeeded.
struct ShaderObject {
    id: GLuint,
}

impl ShaderObject {
    fn compile(stage: ShaderStage, src: &CString) -> Result<Self, PBError> {
        let mut success: GLint = 0;

        unsafe {
            let shader = Self {
                id: gl::CreateShader(stage.gl_enum()),
            };

            gl::ShaderSource(
                shader.id,
                1,
                (&src.as_ptr()) as *const *const c_char,
                std::ptr::null(),
            );

            gl::CompileShader(shader.id);
            gl::GetShaderiv(shader.id, gl::COMPILE_STATUS, (&mut success) as *mut GLint);
            if success != gl::TRUE as GLint {
                return Err(PBError::Compilation {
                    stage,
                    shader_id: shader.id,
                    log: shader_info_log(shader.id),
                });
            }

            Ok(shader)
        }
    }
}

impl Drop for ShaderObject {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) }
    }
}

unsafe fn shader_info_log(shader: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, (&mut len) as *mut GLint);

    let mut buf = vec![0_u8; len.max(1) as usize];
    let mut written: GLint = 0;
    gl::GetShaderInfoLog(
        shader,
        buf.len() as GLint,
        (&mut written) as *mut GLint,
        buf.as_mut_ptr() as *mut c_char,
    );

    log_to_string(&buf[..written.max(0) as usize])
}

unsafe fn program_info_log(program: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, (&mut len) as *mut GLint);

    let mut buf = vec![0_u8; len.max(1) as usize];
    let mut written: GLint = 0;
    gl::GetProgramInfoLog(
        program,
        buf.len() as GLint,
        (&mut written) as *mut GLint,
        buf.as_mut_ptr() as *mut c_char,
    );

    log_to_string(&buf[..written.max(0) as usize])
}

fn log_to_string(data: &[u8]) -> String {
    let data = match data.iter().position(|b| *b == 0) {
        Some(end) => &data[..end],
        None => data,
    };

    String::from_utf8_lossy(data).trim_end().to_string()
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("{0} shader source contains a NUL byte")]
    InvalidSource(ShaderStage),
    #[error("Unable to compile {stage} shader {shader_id}\n{log}")]
    Compilation {
        stage: ShaderStage,
        shader_id: GLuint,
        log: String,
    },
    #[error("Error linking program {program_id}\n{log}")]
    Linking { program_id: GLuint, log: String },
}

/// Location of an active uniform. Never holds the `-1` "not found" value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformLocation(GLint);

impl UniformLocation {
    pub fn new(raw: GLint) -> Option<Self> {
        (raw >= 0).then_some(Self(raw))
    }

    pub fn raw(&self) -> GLint {
        self.0
    }
}

/// Name lookups against a linked program.
pub trait LocationSource {
    fn attrib_location(&self, name: &str) -> Option<GLuint>;
    fn uniform_location(&self, name: &str) -> Option<UniformLocation>;
}

/// Receiver of uniform values for the currently bound program.
pub trait UniformSink {
    fn set_vec2(&mut self, location: UniformLocation, value: [f32; 2]);
    fn set_f32(&mut self, location: UniformLocation, value: f32);
    fn set_u32(&mut self, location: UniformLocation, value: u32);
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) }
    }
}

impl LocationSource for Program {
    fn attrib_location(&self, name: &str) -> Option<GLuint> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetAttribLocation(self.id, name.as_ptr()) };

        GLuint::try_from(location).ok()
    }

    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) };

        UniformLocation::new(location)
    }
}

// glUniform* targets the program currently in use, not `self.id`.
impl UniformSink for Program {
    fn set_vec2(&mut self, location: UniformLocation, value: [f32; 2]) {
        unsafe { gl::Uniform2fv(location.raw(), 1, value.as_ptr()) }
    }

    fn set_f32(&mut self, location: UniformLocation, value: f32) {
        unsafe { gl::Uniform1fv(location.raw(), 1, &value) }
    }

    fn set_u32(&mut self, location: UniformLocation, value: u32) {
        unsafe { gl::Uniform1uiv(location.raw(), 1, &value) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}
