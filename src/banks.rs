//! Bank code directory.
//!
//! Maps 3-digit bank codes to display names. The directory is static
//! configuration, deliberately separate from the checksum and conversion
//! logic: deployments can extend it (CSV rows of `code,name`) without
//! touching the algorithms.

use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// Codes observed across the major Brazilian issuers.
const KNOWN_BANKS: &[(&str, &str)] = &[
    ("001", "Banco do Brasil"),
    ("033", "Santander"),
    ("104", "Caixa Econômica Federal"),
    ("237", "Bradesco"),
    ("341", "Itaú"),
    ("356", "Banco Real"),
    ("389", "Banco Mercantil"),
    ("399", "HSBC"),
    ("422", "Banco Safra"),
    ("453", "Banco Rural"),
    ("633", "Banco Rendimento"),
    ("652", "Itaú Unibanco"),
    ("745", "Citibank"),
];

/// CSV directory record structure.
#[derive(Debug, Deserialize)]
struct BankRecord {
    #[serde(rename = "code", alias = "Code")]
    code: String,
    #[serde(rename = "name", alias = "Name")]
    name: String,
}

/// Lookup table from 3-digit bank code to display name.
///
/// `Default` carries the built-in table; [`BankDirectory::extend_from_read`]
/// layers additional or overriding entries from CSV configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankDirectory {
    names: HashMap<String, String>,
}

impl Default for BankDirectory {
    fn default() -> Self {
        let names = KNOWN_BANKS
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();
        BankDirectory { names }
    }
}

impl BankDirectory {
    /// An empty directory, for callers supplying their own table entirely.
    pub fn empty() -> Self {
        BankDirectory {
            names: HashMap::new(),
        }
    }

    /// Display name for a 3-digit bank code. Unknown codes are simply
    /// absent, never an error.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Add or replace a single entry.
    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.names.insert(code.into(), name.into());
    }

    /// Number of known codes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Merge entries from a `code,name` CSV source, overriding duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use boletokit::BankDirectory;
    ///
    /// let csv = "code,name\n260,Nubank\n";
    /// let mut banks = BankDirectory::default();
    /// banks.extend_from_read(&mut csv.as_bytes())?;
    /// assert_eq!(banks.lookup("260"), Some("Nubank"));
    /// # Ok::<(), boletokit::Error>(())
    /// ```
    pub fn extend_from_read<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        for result in csv_reader.deserialize() {
            let record: BankRecord = result?;
            let code = record.code.trim();
            if code.is_empty() {
                continue;
            }
            self.insert(code, record.name.trim());
        }
        Ok(())
    }
}
