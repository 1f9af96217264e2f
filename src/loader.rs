use std::path::{Path, PathBuf};

use gl::types::GLuint;
use thiserror::Error;

use gl_wrapper::program::{LocationSource, PBError, Program, ProgramBuilder, UniformLocation};

pub const POSITION_ATTRIBUTE: &str = "position";

/// Attribute and uniform locations resolved once after linking.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bindings {
    pub position: GLuint,
    pub resolution: Option<UniformLocation>,
    pub mouse: Option<UniformLocation>,
    pub time: Option<UniformLocation>,
    pub frame: Option<UniformLocation>,
}

impl Bindings {
    pub fn resolve<S: LocationSource>(program: &S) -> Result<Self, LoadError> {
        let position = program
            .attrib_location(POSITION_ATTRIBUTE)
            .ok_or(LoadError::MissingAttribute(POSITION_ATTRIBUTE))?;

        let optional = |name: &str| {
            let location = program.uniform_location(name);
            if location.is_none() {
                tracing::debug!(uniform = name, "shader does not use uniform");
            }
            location
        };

        Ok(Self {
            position,
            resolution: optional("resolution"),
            mouse: optional("mouse"),
            time: optional("time"),
            frame: optional("frame"),
        })
    }
}

pub struct ShaderProgram {
    pub program: Program,
    pub bindings: Bindings,
}

#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: Vec<u8>,
    pub fragment: Vec<u8>,
}

impl ShaderSources {
    pub fn read(vertex_path: &Path, fragment_path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            vertex: read_source(vertex_path)?,
            fragment: read_source(fragment_path)?,
        })
    }

    /// Needs a current GL context.
    pub fn link(&self) -> Result<ShaderProgram, LoadError> {
        let program = ProgramBuilder::new(&self.vertex, &self.fragment).build()?;
        let bindings = Bindings::resolve(&program)?;

        tracing::debug!(program = program.get_id(), ?bindings, "linked shader program");

        Ok(ShaderProgram { program, bindings })
    }
}

fn read_source(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_and_link(vertex_path: &Path, fragment_path: &Path) -> Result<ShaderProgram, LoadError> {
    ShaderSources::read(vertex_path, fragment_path)?.link()
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Build(#[from] PBError),
    #[error("Couldn't find location of '{0}'")]
    MissingAttribute(&'static str),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use gl_wrapper::program::ShaderStage;

    use super::*;

    #[derive(Default)]
    struct FakeProgram {
        attributes: HashMap<&'static str, GLuint>,
        uniforms: HashMap<&'static str, i32>,
    }

    impl LocationSource for FakeProgram {
        fn attrib_location(&self, name: &str) -> Option<GLuint> {
            self.attributes.get(name).copied()
        }

        fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
            self.uniforms
                .get(name)
                .and_then(|raw| UniformLocation::new(*raw))
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn shader_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn missing_position_is_an_error() {
        let program = FakeProgram {
            uniforms: HashMap::from([("time", 0)]),
            ..Default::default()
        };

        let err = Bindings::resolve(&program).unwrap_err();
        assert!(matches!(err, LoadError::MissingAttribute("position")));
        assert_eq!(err.to_string(), "Couldn't find location of 'position'");
    }

    #[test]
    fn absent_uniforms_are_not_errors() {
        let program = FakeProgram {
            attributes: HashMap::from([("position", 0)]),
            ..Default::default()
        };

        let bindings = Bindings::resolve(&program).unwrap();
        assert_eq!(bindings.position, 0);
        assert_eq!(bindings.resolution, None);
        assert_eq!(bindings.mouse, None);
        assert_eq!(bindings.time, None);
        assert_eq!(bindings.frame, None);
    }

    #[test]
    fn each_uniform_resolves_independently() {
        let program = FakeProgram {
            attributes: HashMap::from([("position", 2)]),
            uniforms: HashMap::from([("mouse", 1), ("frame", 4), ("time", -1)]),
        };

        let bindings = Bindings::resolve(&program).unwrap();
        assert_eq!(bindings.position, 2);
        assert_eq!(bindings.resolution, None);
        assert_eq!(bindings.mouse, UniformLocation::new(1));
        assert_eq!(bindings.time, None);
        assert_eq!(bindings.frame, UniformLocation::new(4));
    }

    #[test]
    fn read_error_names_the_path() {
        let dir = shader_dir();
        let missing = dir.join("shaders/does-not-exist.frag");

        let err = ShaderSources::read(&dir.join("shaders/vertex.vert"), &missing).unwrap_err();
        match &err {
            LoadError::Read { path, .. } => assert_eq!(path, &missing),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("Failed to load "));
        assert!(err.to_string().contains("does-not-exist.frag"));
    }

    #[test]
    fn reads_bundled_shaders() {
        let dir = shader_dir();

        let sources =
            ShaderSources::read(&dir.join("shaders/vertex.vert"), &dir.join("fragment.frag"))
                .unwrap();
        assert!(contains(&sources.vertex, b"in vec2 position;"));
        assert!(contains(&sources.fragment, b"uniform vec2 resolution;"));
    }

    #[test]
    fn non_utf8_source_is_read_verbatim() {
        let dir = std::env::temp_dir().join(format!("shader-kit-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let latin1 = dir.join("latin1.frag");
        let source = b"#version 410 core\n// caf\xe9\nvoid main() {}\n".to_vec();
        std::fs::write(&latin1, &source).unwrap();

        let sources = ShaderSources::read(&shader_dir().join("shaders/vertex.vert"), &latin1);
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(sources.unwrap().fragment, source);
    }

    #[test]
    fn build_errors_keep_stage_diagnostics() {
        let err = LoadError::from(PBError::Compilation {
            stage: ShaderStage::Vertex,
            shader_id: 1,
            log: "undeclared identifier".to_string(),
        });

        let msg = err.to_string();
        assert!(msg.contains("vertex"));
        assert!(msg.contains("undeclared identifier"));
    }
}
