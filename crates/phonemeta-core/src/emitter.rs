//! Rendering serialized metadata as a Rust source file.
//!
//! ## Format
//!
//! ```text
//! // Copyright (C) 2012 The Libphonenumber Authors
//! // ...licence text...
//!
//! pub const METADATA: [u8; 4] = [
//!   0xCA, 0xFE, 0xBA, 0xBE
//! ];
//! ```
//!
//! Bytes are written as upper case `0xHH` literals, [`BYTES_PER_LINE`] per line,
//! each line indented by two spaces. The payload is emitted positionally and
//! never reordered.

use std::fmt::{self, Write};

use crate::config::BannerConfig;
use crate::types::MetadataType;
use crate::Result;

/// Number of byte literals on each line of the array.
pub const BYTES_PER_LINE: usize = 13;

const LICENSE_BODY: &[&str] = &[
    "",
    "Licensed under the Apache License, Version 2.0 (the \"License\");",
    "you may not use this file except in compliance with the License.",
    "You may obtain a copy of the License at",
    "",
    "http://www.apache.org/licenses/LICENSE-2.0",
    "",
    "Unless required by applicable law or agreed to in writing, software",
    "distributed under the License is distributed on an \"AS IS\" BASIS,",
    "WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.",
    "See the License for the specific language governing permissions and",
    "limitations under the License.",
];

/// Writes licensing banners and byte-array constants.
#[derive(Debug, Clone, Default)]
pub struct SourceEmitter {
    banner: BannerConfig,
}

impl SourceEmitter {
    /// Create an emitter naming the holders from `banner`.
    pub const fn new(banner: BannerConfig) -> Self {
        Self { banner }
    }

    /// Render a complete source file for `data` bound to `constant_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting fails.
    pub fn render(
        &self,
        metadata_type: MetadataType,
        data: &[u8],
        constant_name: &str,
    ) -> Result<String> {
        let mut out = String::with_capacity(data.len() * 6 + 1024);
        self.write_to(&mut out, metadata_type, data, constant_name)?;
        Ok(out)
    }

    /// Write a complete source file to `out`.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        out: &mut W,
        metadata_type: MetadataType,
        data: &[u8],
        constant_name: &str,
    ) -> fmt::Result {
        self.write_banner(
            out,
            metadata_type.copyright_year(),
            metadata_type.copyright_second_year(),
        )?;
        writeln!(out, "pub const {constant_name}: [u8; {}] = [", data.len())?;
        write_array_data(out, data)?;
        writeln!(out, "];")
    }

    /// Write the licensing banner followed by a blank line.
    pub fn write_banner<W: Write + ?Sized>(
        &self,
        out: &mut W,
        first_year: u16,
        second_year: u16,
    ) -> fmt::Result {
        writeln!(
            out,
            "// Copyright (C) {first_year} {}",
            self.banner.original_holder
        )?;
        writeln!(
            out,
            "// Copyright (C) {second_year} {}",
            self.banner.adaptation_holder
        )?;
        for line in LICENSE_BODY {
            if line.is_empty() {
                writeln!(out, "//")?;
            } else {
                writeln!(out, "// {line}")?;
            }
        }
        writeln!(out)
    }
}

/// Write the array body: `BYTES_PER_LINE` literals per line, ending with a newline.
pub fn write_array_data<W: Write + ?Sized>(out: &mut W, data: &[u8]) -> fmt::Result {
    let mut separator = "  ";
    for (i, byte) in data.iter().enumerate() {
        write!(out, "{separator}0x{byte:02X}")?;
        separator = if (i + 1) % BYTES_PER_LINE == 0 {
            ",\n  "
        } else {
            ", "
        };
    }
    writeln!(out)
}
