//! Command-line option parsing for a single generation run.
//!
//! The invocation has a fixed shape:
//!
//! ```text
//! <ignored> <inputPath> <outputDir> <basename> [--const-name=<NAME> | "--const-name <NAME>"]
//! ```
//!
//! where `<basename>` is `[test_|lite_]<type>`. Validation is total: either all
//! four positional facts are extracted, or parsing fails with the usage text
//! before anything touches the filesystem.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{MetadataType, Variant};
use crate::{Error, Result};

/// Constant name used when no `--const-name` override is given.
pub const DEFAULT_CONSTANT_NAME: &str = "METADATA";

#[allow(clippy::expect_used)]
static BASENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(test|lite)_)?([a-z_]+)$").expect("basename regex is valid")
});

#[allow(clippy::expect_used)]
static CONST_NAME_FLAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--const-name[ =](\S*)$").expect("const-name regex is valid")
});

#[allow(clippy::expect_used)]
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid")
});

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Returns `true` if `name` can be used verbatim as a Rust constant identifier.
#[must_use]
pub fn is_valid_constant_name(name: &str) -> bool {
    name != "_" && IDENTIFIER_RE.is_match(name) && !RUST_KEYWORDS.contains(&name)
}

/// Splits a basename token into its type and variant.
///
/// Returns `None` when the token does not match `[test_|lite_]<type>` or the
/// type name is unknown.
#[must_use]
pub fn parse_basename(token: &str) -> Option<(MetadataType, Variant)> {
    let captures = BASENAME_RE.captures(token)?;
    let variant = Variant::parse(captures.get(1).map(|m| m.as_str()))?;
    let ty = MetadataType::parse(captures.get(2)?.as_str())?;
    Some((ty, variant))
}

/// Usage text for `command`, listing every valid metadata type.
#[must_use]
pub fn usage(command: &str) -> String {
    let types: Vec<&str> = MetadataType::values().iter().map(|t| t.name()).collect();
    format!(
        "Usage: {command} <inputXmlFile> <outputDir> ( <type> | test_<type> | lite_<type> ) \
         [--const-name <nameOfMetadataConstant>]\n       where <type> is one of: [{}]",
        types.join(", ")
    )
}

/// Immutable, validated options of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    input_path: PathBuf,
    output_dir: PathBuf,
    metadata_type: MetadataType,
    variant: Variant,
    constant_name: String,
}

impl Options {
    /// Parses raw invocation tokens.
    ///
    /// `args` has either 4 tokens, or 5 tokens when one of them is a
    /// `--const-name` override. The first positional token is ignored (it is the
    /// label the tool was invoked under).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] naming `command` for any other arity, an
    /// unmatched basename, an unknown type or an invalid constant name.
    pub fn parse<S: AsRef<str>>(command: &str, args: &[S]) -> Result<Self> {
        let mut tokens: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
        let mut constant_name = DEFAULT_CONSTANT_NAME.to_string();

        if tokens.len() == 5 {
            let flag = tokens.iter().enumerate().find_map(|(idx, token)| {
                CONST_NAME_FLAG_RE
                    .captures(token)
                    .and_then(|c| c.get(1))
                    .map(|m| (idx, m.as_str().to_string()))
            });
            if let Some((idx, name)) = flag {
                if !is_valid_constant_name(&name) {
                    tracing::debug!(constant = %name, "rejected constant name");
                    return Err(Error::Usage(usage(command)));
                }
                constant_name = name;
                tokens.remove(idx);
            }
        }

        if let [_, input, output_dir, basename] = tokens.as_slice() {
            if let Some((metadata_type, variant)) = parse_basename(basename) {
                return Ok(Self {
                    input_path: PathBuf::from(input),
                    output_dir: PathBuf::from(output_dir),
                    metadata_type,
                    variant,
                    constant_name,
                });
            }
            tracing::debug!(basename = %basename, "basename did not resolve");
        }

        Err(Error::Usage(usage(command)))
    }

    /// Path of the metadata source document.
    #[must_use]
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Directory the artifact is written into.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Requested metadata type.
    #[must_use]
    pub const fn metadata_type(&self) -> MetadataType {
        self.metadata_type
    }

    /// Requested variant.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Identifier the payload is bound to.
    #[must_use]
    pub fn constant_name(&self) -> &str {
        &self.constant_name
    }

    /// Basename of the artifact, e.g. `lite_metadata`.
    #[must_use]
    pub fn basename(&self) -> String {
        self.variant.basename(self.metadata_type)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const IGNORED: &str = "IGNORED";
    const OUTPUT_DIR: &str = "output/dir";
    const INPUT_PATH_XML: &str = "input/path.xml";

    fn assert_usage_error(result: Result<Options>, command: &str) {
        match result {
            Err(Error::Usage(msg)) => {
                assert!(msg.contains(command), "usage should name {command}: {msg}");
                for ty in MetadataType::values() {
                    assert!(msg.contains(ty.name()), "usage should list {ty}: {msg}");
                }
            },
            other => panic!("expected usage error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_bad_options() {
        assert_usage_error(Options::parse("MyCommand", &[IGNORED]), "MyCommand");
    }

    #[test]
    fn test_parse_good_options_with_equals_flag() {
        let opt = Options::parse(
            "MyCommand",
            &[
                IGNORED,
                INPUT_PATH_XML,
                OUTPUT_DIR,
                "test_alternate_format",
                "--const-name=METADATA",
            ],
        )
        .unwrap();

        assert_eq!(opt.metadata_type(), MetadataType::AlternateFormat);
        assert_eq!(opt.variant(), Variant::Test);
        assert_eq!(opt.input_path(), Path::new(INPUT_PATH_XML));
        assert_eq!(opt.output_dir(), Path::new(OUTPUT_DIR));
        assert_eq!(opt.constant_name(), "METADATA");
    }

    #[test]
    fn test_parse_flag_with_space_in_any_position() {
        let opt = Options::parse(
            "MyCommand",
            &[
                IGNORED,
                "--const-name TEST_METADATA",
                INPUT_PATH_XML,
                OUTPUT_DIR,
                "metadata",
            ],
        )
        .unwrap();

        assert_eq!(opt.metadata_type(), MetadataType::Metadata);
        assert_eq!(opt.variant(), Variant::Full);
        assert_eq!(opt.constant_name(), "TEST_METADATA");
    }

    #[test]
    fn test_default_constant_name() {
        let opt =
            Options::parse("cmd", &[IGNORED, INPUT_PATH_XML, OUTPUT_DIR, "lite_short_numbers"])
                .unwrap();
        assert_eq!(opt.constant_name(), DEFAULT_CONSTANT_NAME);
        assert_eq!(opt.variant(), Variant::Lite);
        assert_eq!(opt.basename(), "lite_short_numbers");
    }

    #[test]
    fn test_unknown_basename_is_rejected() {
        assert_usage_error(
            Options::parse("cmd", &[IGNORED, INPUT_PATH_XML, OUTPUT_DIR, "xxx"]),
            "cmd",
        );
        assert_usage_error(
            Options::parse("cmd", &[IGNORED, INPUT_PATH_XML, OUTPUT_DIR, "beta_metadata"]),
            "cmd",
        );
        assert_usage_error(
            Options::parse("cmd", &[IGNORED, INPUT_PATH_XML, OUTPUT_DIR, "Metadata"]),
            "cmd",
        );
    }

    #[test]
    fn test_five_tokens_without_flag_are_rejected() {
        assert_usage_error(
            Options::parse(
                "cmd",
                &[IGNORED, INPUT_PATH_XML, OUTPUT_DIR, "metadata", "extra"],
            ),
            "cmd",
        );
    }

    #[test]
    fn test_split_flag_is_six_tokens() {
        assert_usage_error(
            Options::parse(
                "cmd",
                &[
                    IGNORED,
                    INPUT_PATH_XML,
                    OUTPUT_DIR,
                    "metadata",
                    "--const-name",
                    "X",
                ],
            ),
            "cmd",
        );
    }

    #[test]
    fn test_invalid_constant_names_are_rejected() {
        let bad_flags = [
            "--const-name=9LIVES",
            "--const-name=has-dash",
            "--const-name=fn",
            "--const-name=_",
            "--const-name=",
        ];
        for bad in bad_flags {
            assert_usage_error(
                Options::parse("cmd", &[IGNORED, INPUT_PATH_XML, OUTPUT_DIR, "metadata", bad]),
                "cmd",
            );
        }
    }

    #[test]
    fn test_whitespace_around_constant_name_is_rejected() {
        let padded_flags = [
            "--const-name= FOO",
            "--const-name=FOO ",
            "--const-name  FOO",
            "--const-name FOO\t",
        ];
        for padded in padded_flags {
            assert_usage_error(
                Options::parse("cmd", &[IGNORED, INPUT_PATH_XML, OUTPUT_DIR, "metadata", padded]),
                "cmd",
            );
        }
    }

    #[test]
    fn test_is_valid_constant_name() {
        assert!(is_valid_constant_name("METADATA"));
        assert!(is_valid_constant_name("_PRIVATE"));
        assert!(is_valid_constant_name("META2"));
        assert!(!is_valid_constant_name(""));
        assert!(!is_valid_constant_name("2META"));
        assert!(!is_valid_constant_name("META DATA"));
        assert!(!is_valid_constant_name("self"));
    }

    #[test]
    fn test_usage_lists_types() {
        let text = usage("BuildMetadataRustFromXml");
        assert!(text.starts_with("Usage: BuildMetadataRustFromXml "));
        assert!(text.contains("[metadata, alternate_format, short_numbers]"));
    }

    fn any_type() -> impl Strategy<Value = MetadataType> {
        prop::sample::select(MetadataType::ALL.to_vec())
    }

    fn any_variant() -> impl Strategy<Value = Variant> {
        prop::sample::select(Variant::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn test_basename_roundtrip(ty in any_type(), variant in any_variant()) {
            let basename = variant.basename(ty);
            prop_assert_eq!(parse_basename(&basename), Some((ty, variant)));
        }

        #[test]
        fn test_arity_outside_four_or_five_fails(len in 0usize..12) {
            prop_assume!(len != 4 && len != 5);
            let args: Vec<String> = (0..len).map(|_| "metadata".to_string()).collect();
            let result = Options::parse("arity", &args);
            prop_assert!(matches!(result, Err(Error::Usage(ref msg)) if msg.contains("arity")));
        }

        #[test]
        fn test_fields_match_tokens(
            ty in any_type(),
            variant in any_variant(),
            input in "[a-z]{1,8}/[a-z]{1,8}\\.xml",
            out in "[a-z]{1,8}",
            name in "[A-Z][A-Z0-9_]{0,12}",
        ) {
            let flag = format!("--const-name={name}");
            let basename = variant.basename(ty);
            let opt = Options::parse("cmd", &[IGNORED, input.as_str(), out.as_str(), basename.as_str(), flag.as_str()]).unwrap();
            prop_assert_eq!(opt.metadata_type(), ty);
            prop_assert_eq!(opt.variant(), variant);
            prop_assert_eq!(opt.input_path(), Path::new(&input));
            prop_assert_eq!(opt.output_dir(), Path::new(&out));
            prop_assert_eq!(opt.constant_name(), name.as_str());
        }
    }
}
