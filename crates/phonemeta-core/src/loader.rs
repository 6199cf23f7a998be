//! Loading serialized metadata bytes through an external converter.
//!
//! The compiler never interprets metadata itself. A [`MetadataConverter`] turns
//! the source document into the canonical serialized byte sequence and the
//! [`ByteLoader`] buffers that sequence in memory for the emitter.
//!
//! Two converters ship with the crate:
//!
//! - [`CommandConverter`] runs an external program (typically the libphonenumber
//!   `BuildMetadataFromXml` tool) and captures its standard output.
//! - [`RawConverter`] reads an input that is already serialized.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::ConverterConfig;
use crate::types::MetadataType;
use crate::{Error, Result};

/// A single conversion request handed to a [`MetadataConverter`].
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    /// Metadata source document.
    pub input: &'a Path,
    /// Type of metadata the document describes.
    pub metadata_type: MetadataType,
    /// Drop example numbers from the output.
    pub strip_examples: bool,
}

/// Converts a metadata source document into its serialized byte form.
///
/// Implementations write the complete payload to `out` and must not keep any
/// handle open once they return.
pub trait MetadataConverter {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Serialize the document described by `request` into `out`.
    fn serialize(&self, request: &ConversionRequest<'_>, out: &mut dyn Write) -> Result<()>;
}

/// Runs an external program and treats its standard output as the payload.
///
/// Every argument may contain the placeholders `{input}`, `{type}` and `{lite}`
/// (`true` or `false`). When `lite_flag` is set it is appended as an extra
/// argument only for requests that strip examples.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
    lite_flag: Option<String>,
}

impl CommandConverter {
    /// Create a converter invoking `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>, lite_flag: Option<String>) -> Self {
        Self {
            program: program.into(),
            args,
            lite_flag,
        }
    }

    /// Arguments for `request` after placeholder substitution.
    #[must_use]
    pub fn expand_args(&self, request: &ConversionRequest<'_>) -> Vec<String> {
        let input = request.input.display().to_string();
        let lite = request.strip_examples.to_string();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                arg.replace("{input}", &input)
                    .replace("{type}", request.metadata_type.name())
                    .replace("{lite}", &lite)
            })
            .collect();
        if request.strip_examples {
            if let Some(flag) = &self.lite_flag {
                args.push(flag.clone());
            }
        }
        args
    }
}

impl MetadataConverter for CommandConverter {
    fn name(&self) -> &str {
        &self.program
    }

    fn serialize(&self, request: &ConversionRequest<'_>, out: &mut dyn Write) -> Result<()> {
        let args = self.expand_args(request);
        debug!(program = %self.program, ?args, "running converter");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::Conversion(format!("failed to start '{}': {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr.trim();
            return Err(Error::Conversion(if reason.is_empty() {
                format!("'{}' exited with {}", self.program, output.status)
            } else {
                format!("'{}' exited with {}: {reason}", self.program, output.status)
            }));
        }

        out.write_all(&output.stdout)?;
        Ok(())
    }
}

/// Passes an already serialized input through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawConverter;

impl MetadataConverter for RawConverter {
    fn name(&self) -> &str {
        "raw"
    }

    fn serialize(&self, request: &ConversionRequest<'_>, out: &mut dyn Write) -> Result<()> {
        if request.strip_examples {
            return Err(Error::Conversion(format!(
                "cannot strip example data from pre-serialized input {}",
                request.input.display()
            )));
        }
        let mut file = File::open(request.input)?;
        io::copy(&mut file, out)?;
        Ok(())
    }
}

/// Build the converter described by `config`.
#[must_use]
pub fn converter_from_config(config: &ConverterConfig) -> Box<dyn MetadataConverter> {
    match config {
        ConverterConfig::Raw => Box::new(RawConverter),
        ConverterConfig::Command {
            program,
            args,
            lite_flag,
        } => Box::new(CommandConverter::new(
            program.clone(),
            args.clone(),
            lite_flag.clone(),
        )),
    }
}

/// Obtains the serialized payload for a generation run.
pub struct ByteLoader {
    converter: Box<dyn MetadataConverter>,
}

impl ByteLoader {
    /// Create a loader delegating to `converter`.
    pub fn new(converter: Box<dyn MetadataConverter>) -> Self {
        Self { converter }
    }

    /// Load the payload for `input`.
    ///
    /// The converter output is buffered completely before it is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `input` does not exist, [`Error::Io`] if it
    /// cannot be inspected, and whatever the converter reports otherwise.
    pub fn load(
        &self,
        input: &Path,
        metadata_type: MetadataType,
        strip_examples: bool,
    ) -> Result<Vec<u8>> {
        match fs::metadata(input) {
            Ok(_) => {},
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound(format!(
                    "metadata input {}",
                    input.display()
                )));
            },
            Err(e) => return Err(Error::Io(e)),
        }

        let request = ConversionRequest {
            input,
            metadata_type,
            strip_examples,
        };
        let mut buffer = Vec::new();
        self.converter.serialize(&request, &mut buffer)?;

        debug!(
            converter = self.converter.name(),
            input = %input.display(),
            %metadata_type,
            strip_examples,
            bytes = buffer.len(),
            "loaded metadata"
        );
        Ok(buffer)
    }
}

impl std::fmt::Debug for ByteLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteLoader")
            .field("converter", &self.converter.name())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Records every request and answers with fixed bytes.
    struct RecordingConverter {
        payload: Vec<u8>,
        seen: Rc<RefCell<Vec<bool>>>,
    }

    impl MetadataConverter for RecordingConverter {
        fn name(&self) -> &str {
            "recording"
        }

        fn serialize(&self, request: &ConversionRequest<'_>, out: &mut dyn Write) -> Result<()> {
            self.seen.borrow_mut().push(request.strip_examples);
            out.write_all(&self.payload)?;
            Ok(())
        }
    }

    struct FailingConverter;

    impl MetadataConverter for FailingConverter {
        fn name(&self) -> &str {
            "failing"
        }

        fn serialize(&self, _: &ConversionRequest<'_>, _: &mut dyn Write) -> Result<()> {
            Err(Error::Conversion("document rejected".to_string()))
        }
    }

    fn input_file(dir: &TempDir, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join("input.xml");
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_load_buffers_converter_output() {
        let dir = TempDir::new().unwrap();
        let input = input_file(&dir, b"<xml/>");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let loader = ByteLoader::new(Box::new(RecordingConverter {
            payload: vec![0xCA, 0xFE, 0xBA, 0xBE],
            seen: Rc::clone(&seen),
        }));

        let bytes = loader.load(&input, MetadataType::Metadata, false).unwrap();

        assert_eq!(bytes, vec![0xCA, 0xFE, 0xBA, 0xBE]);
        assert_eq!(*seen.borrow(), vec![false]);
    }

    #[test]
    fn test_load_passes_strip_flag_through() {
        let dir = TempDir::new().unwrap();
        let input = input_file(&dir, b"<xml/>");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let loader = ByteLoader::new(Box::new(RecordingConverter {
            payload: Vec::new(),
            seen: Rc::clone(&seen),
        }));

        loader.load(&input, MetadataType::ShortNumbers, true).unwrap();
        loader.load(&input, MetadataType::ShortNumbers, false).unwrap();

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_missing_input_is_not_found() {
        let dir = TempDir::new().unwrap();
        let loader = ByteLoader::new(Box::new(RawConverter));

        let err = loader
            .load(&dir.path().join("absent.xml"), MetadataType::Metadata, false)
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(ref msg) if msg.contains("absent.xml")));
    }

    #[test]
    fn test_converter_errors_propagate() {
        let dir = TempDir::new().unwrap();
        let input = input_file(&dir, b"<xml/>");
        let loader = ByteLoader::new(Box::new(FailingConverter));

        let err = loader
            .load(&input, MetadataType::Metadata, false)
            .unwrap_err();

        assert_eq!(err.category(), "conversion");
        assert!(err.to_string().contains("document rejected"));
    }

    #[test]
    fn test_raw_converter_copies_bytes() {
        let dir = TempDir::new().unwrap();
        let input = input_file(&dir, &[0x00, 0x01, 0xFF]);
        let loader = ByteLoader::new(Box::new(RawConverter));

        let bytes = loader.load(&input, MetadataType::Metadata, false).unwrap();

        assert_eq!(bytes, vec![0x00, 0x01, 0xFF]);
    }

    #[test]
    fn test_raw_converter_refuses_to_strip() {
        let dir = TempDir::new().unwrap();
        let input = input_file(&dir, &[0x01]);
        let loader = ByteLoader::new(Box::new(RawConverter));

        let err = loader
            .load(&input, MetadataType::Metadata, true)
            .unwrap_err();

        assert!(matches!(err, Error::Conversion(_)));
    }

    #[test]
    fn test_command_converter_expands_placeholders() {
        let converter = CommandConverter::new(
            "java",
            vec![
                "-jar".to_string(),
                "tool.jar".to_string(),
                "--input={input}".to_string(),
                "--type={type}".to_string(),
                "--lite={lite}".to_string(),
            ],
            Some("--lite-build".to_string()),
        );
        let request = ConversionRequest {
            input: Path::new("res/meta.xml"),
            metadata_type: MetadataType::AlternateFormat,
            strip_examples: true,
        };

        let args = converter.expand_args(&request);

        assert_eq!(
            args,
            vec![
                "-jar",
                "tool.jar",
                "--input=res/meta.xml",
                "--type=alternate_format",
                "--lite=true",
                "--lite-build",
            ]
        );
    }

    #[test]
    fn test_command_converter_omits_lite_flag_for_full_requests() {
        let converter =
            CommandConverter::new("conv", vec!["{input}".to_string()], Some("--lite".to_string()));
        let request = ConversionRequest {
            input: Path::new("in.xml"),
            metadata_type: MetadataType::Metadata,
            strip_examples: false,
        };

        assert_eq!(converter.expand_args(&request), vec!["in.xml"]);
    }

    #[test]
    fn test_command_converter_reports_missing_program() {
        let converter = CommandConverter::new("phonemeta-no-such-converter", Vec::new(), None);
        let request = ConversionRequest {
            input: Path::new("in.xml"),
            metadata_type: MetadataType::Metadata,
            strip_examples: false,
        };
        let mut out = Vec::new();

        let err = converter.serialize(&request, &mut out).unwrap_err();

        assert!(matches!(err, Error::Conversion(ref msg) if msg.contains("failed to start")));
        assert!(out.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_converter_captures_stdout() {
        let converter = CommandConverter::new(
            "sh",
            vec!["-c".to_string(), "printf 'abc'".to_string()],
            None,
        );
        let request = ConversionRequest {
            input: Path::new("in.xml"),
            metadata_type: MetadataType::Metadata,
            strip_examples: false,
        };
        let mut out = Vec::new();

        converter.serialize(&request, &mut out).unwrap();

        assert_eq!(out, b"abc");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_converter_surfaces_stderr_on_failure() {
        let converter = CommandConverter::new(
            "sh",
            vec!["-c".to_string(), "echo 'bad region' >&2; exit 3".to_string()],
            None,
        );
        let request = ConversionRequest {
            input: Path::new("in.xml"),
            metadata_type: MetadataType::Metadata,
            strip_examples: false,
        };
        let mut out = Vec::new();

        let err = converter.serialize(&request, &mut out).unwrap_err();

        assert!(matches!(err, Error::Conversion(ref msg) if msg.contains("bad region")));
        assert!(out.is_empty());
    }
}
