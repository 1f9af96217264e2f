use std::ffi::c_void;

use gl::types::{GLenum, GLuint};
use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<(GLuint, VertexAttribute)>,
    primitive: Primitive,
    data: &'a [f32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            primitive: Primitive::Triangles,
        }
    }

    /// Binds the next attribute in the interleaved layout to a location
    /// queried from a linked program.
    pub fn with_attribute_at(mut self, location: GLuint, attr: VertexAttribute) -> Self {
        self.attributes.push((location, attr));
        self
    }

    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.primitive = primitive;
        self
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let total_len = stride(&self.attributes);

        if total_len == 0 {
            return Err(GBError::NoAttributes);
        }

        if self.data.len() % total_len != 0 {
            return Err(GBError::InvalidDataLength);
        }

        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (location, attr) in self.attributes.iter() {
                gl::VertexAttribPointer(
                    *location,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (total_len * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                offset += attr.size();
                gl::EnableVertexAttribArray(*location);
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        let vertices = self.data.len() / total_len;

        Ok(Geometry {
            vao,
            vbo,
            vertices,
            primitive: self.primitive,
        })
    }
}

fn stride(attributes: &[(GLuint, VertexAttribute)]) -> usize {
    attributes.iter().map(|(_, a)| a.size()).sum()
}

#[derive(Debug, Error)]
pub enum GBError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Geometry needs at least one vertex attribute")]
    NoAttributes,
}

#[derive(Debug, Copy, Clone)]
pub enum VertexAttribute {
    Vec2,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Vec2 => 2,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    TriangleStrip,
}

impl Primitive {
    pub fn gl_enum(&self) -> GLenum {
        match self {
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::TriangleStrip => gl::TRIANGLE_STRIP,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    vertices: usize,
    primitive: Primitive,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }
    pub fn vertices(&self) -> usize {
        self.vertices
    }
    pub fn primitive(&self) -> Primitive {
        self.primitive
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}
