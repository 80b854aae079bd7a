/*!
 * Core document model for a reading: verses, verse groups and the
 * tradition-specific alternates that may replace them.
 *
 * Documents arrive as JSON produced by the data pipeline. The loader accepts
 * either a list of verse groups (`aliyot`) or a flat verse list, which is
 * wrapped in a single synthetic group.
 */

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::{DocumentError, TraditionError};

/// A textual tradition ("nusach") affecting verse text and grouping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Tradition {
    #[default]
    Standard,
    Yemenite,
}

impl Tradition {
    /// Every tradition the resolver may select.
    pub const ALL: [Tradition; 2] = [Tradition::Standard, Tradition::Yemenite];

    // @returns: Identifier used in documents and configuration
    pub fn id(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Yemenite => "yemenite",
        }
    }

    // @returns: Name shown to readers
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Standard => "כללי",
            Self::Yemenite => "תימני",
        }
    }

    /// The default tradition has no alternates; its text is the document's base text.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Tradition {
    type Err = TraditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "yemenite" => Ok(Self::Yemenite),
            _ => Err(TraditionError::Unknown(s.to_string())),
        }
    }
}

/// Structural chapter/verse numbering of a verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    pub chapter: u32,
    pub verse: u32,
}

/// Tradition-specific replacement for a verse's text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseVersion {
    /// Fully marked source text
    #[serde(default)]
    pub text_full: String,

    /// Practice-script rendering
    #[serde(default)]
    pub text_clean: String,
}

impl VerseVersion {
    pub fn new(text_full: &str, text_clean: &str) -> Self {
        Self {
            text_full: text_full.to_string(),
            text_clean: text_clean.to_string(),
        }
    }
}

/// A single verse with its base text and optional per-tradition overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Position within the containing document
    #[serde(default)]
    pub verse_num: u32,

    /// Chapter number (primary readings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<u32>,

    /// Verse number within the chapter (primary readings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<u32>,

    /// Fully marked source text
    #[serde(default)]
    pub text_full: String,

    /// Practice-script rendering
    #[serde(default)]
    pub text_clean: String,

    /// Translation, identical for every tradition
    #[serde(default)]
    pub targum: String,

    /// Overrides keyed by tradition
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "deserialize_versions"
    )]
    pub versions: BTreeMap<Tradition, VerseVersion>,
}

impl Verse {
    /// Create a verse with base text only.
    pub fn new(verse_num: u32, text_full: &str, text_clean: &str) -> Self {
        Self {
            verse_num,
            chapter: None,
            verse: None,
            text_full: text_full.to_string(),
            text_clean: text_clean.to_string(),
            targum: String::new(),
            versions: BTreeMap::new(),
        }
    }

    /// Set the chapter and verse numbers.
    pub fn with_citation(mut self, chapter: u32, verse: u32) -> Self {
        self.chapter = Some(chapter);
        self.verse = Some(verse);
        self
    }

    /// Set the translation text.
    pub fn with_targum(mut self, targum: &str) -> Self {
        self.targum = targum.to_string();
        self
    }

    /// Add an override for one tradition.
    pub fn with_version(mut self, tradition: Tradition, text_full: &str, text_clean: &str) -> Self {
        self.versions
            .insert(tradition, VerseVersion::new(text_full, text_clean));
        self
    }

    /// The citation, present only when both chapter and verse are known.
    pub fn citation(&self) -> Option<Citation> {
        match (self.chapter, self.verse) {
            (Some(chapter), Some(verse)) => Some(Citation { chapter, verse }),
            _ => None,
        }
    }
}

// Override maps come from hand-edited data; keys for traditions this crate
// does not know are dropped rather than failing the whole document.
fn deserialize_versions<'de, D>(deserializer: D) -> Result<BTreeMap<Tradition, VerseVersion>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, VerseVersion>> = Option::deserialize(deserializer)?;
    let mut versions = BTreeMap::new();

    for (key, version) in raw.unwrap_or_default() {
        match key.parse::<Tradition>() {
            Ok(tradition) => {
                versions.insert(tradition, version);
            }
            Err(e) => warn!("Ignoring verse override: {}", e),
        }
    }

    Ok(versions)
}

/// Whether a group belongs to the primary reading or is the trailing supplementary reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    #[default]
    Primary,
    Supplementary,
}

impl GroupKind {
    pub fn is_primary(&self) -> bool {
        *self == Self::Primary
    }
}

/// A contiguous group of verses read as one unit ("aliyah").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseGroup {
    /// 1-based ordinal
    pub num: u32,

    /// Human-readable citation range
    #[serde(default)]
    pub range: String,

    /// Verses in document order
    #[serde(default)]
    pub verses: Vec<Verse>,

    /// Set by the resolver; never stored as primary
    #[serde(default, skip_serializing_if = "GroupKind::is_primary")]
    pub kind: GroupKind,
}

impl VerseGroup {
    pub fn new(num: u32, range: &str, verses: Vec<Verse>) -> Self {
        Self {
            num,
            range: range.to_string(),
            verses,
            kind: GroupKind::Primary,
        }
    }

    /// Mark this group as a supplementary reading.
    pub fn into_supplementary(mut self) -> Self {
        self.kind = GroupKind::Supplementary;
        self
    }

    pub fn is_supplementary(&self) -> bool {
        self.kind == GroupKind::Supplementary
    }

    /// Citations of every verse that carries one, in order.
    pub fn citations(&self) -> impl Iterator<Item = Citation> + '_ {
        self.verses.iter().filter_map(Verse::citation)
    }
}

/// Groups and supplementary reading that replace the defaults for one tradition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlternateReading {
    /// Replacement primary list (ignored when empty)
    pub groups: Vec<VerseGroup>,

    /// Replacement supplementary group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementary: Option<VerseGroup>,

    /// Replacement citation of the whole reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A complete reading document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Stable identifier (file stem when the payload has none)
    pub id: String,

    /// English name
    pub name: String,

    /// Hebrew name
    pub hebrew: String,

    /// Citation of the whole reading
    pub reference: String,

    /// Default primary verse groups
    pub groups: Vec<VerseGroup>,

    /// Default supplementary reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementary: Option<VerseGroup>,

    /// Replacements keyed by non-default tradition
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub alternates: BTreeMap<Tradition, AlternateReading>,

    /// Whether the document was hand-edited after generation
    #[serde(default)]
    pub is_override: bool,
}

impl Document {
    /// Create a document from its default groups.
    pub fn new(id: &str, name: &str, groups: Vec<VerseGroup>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            hebrew: String::new(),
            reference: String::new(),
            groups,
            supplementary: None,
            alternates: BTreeMap::new(),
            is_override: false,
        }
    }

    /// Set the citation of the whole reading.
    pub fn with_reference(mut self, reference: &str) -> Self {
        self.reference = reference.to_string();
        self
    }

    /// Set the default supplementary reading.
    pub fn with_supplementary(mut self, group: VerseGroup) -> Self {
        self.supplementary = Some(group);
        self
    }

    /// Set the alternate primary groups for a tradition.
    pub fn with_alternate_groups(mut self, tradition: Tradition, groups: Vec<VerseGroup>) -> Self {
        self.alternates.entry(tradition).or_default().groups = groups;
        self
    }

    /// Set the alternate supplementary reading for a tradition.
    pub fn with_alternate_supplementary(mut self, tradition: Tradition, group: VerseGroup) -> Self {
        self.alternates.entry(tradition).or_default().supplementary = Some(group);
        self
    }

    /// Alternates defined for a tradition, if any.
    pub fn alternate(&self, tradition: Tradition) -> Option<&AlternateReading> {
        self.alternates.get(&tradition)
    }

    /// Name to show in headings, preferring the Hebrew name.
    pub fn display_name(&self) -> &str {
        if self.hebrew.is_empty() {
            &self.name
        } else {
            &self.hebrew
        }
    }

    /// Parse a document from JSON text.
    ///
    /// `fallback_id` is used when the payload carries no `id` or `name`.
    pub fn from_json_str(json: &str, fallback_id: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value, fallback_id)
    }

    /// Build a document from an already parsed JSON value.
    pub fn from_value(value: Value, fallback_id: &str) -> Result<Self, DocumentError> {
        let Value::Object(mut fields) = value else {
            return Err(DocumentError::Malformed {
                id: fallback_id.to_string(),
                reason: "expected a JSON object".to_string(),
            });
        };

        let id = string_field(&fields, "id").unwrap_or_else(|| fallback_id.to_string());
        let name = string_field(&fields, "name").unwrap_or_else(|| id.clone());
        let hebrew = string_field(&fields, "hebrew").unwrap_or_default();
        let reference = string_field(&fields, "ref").unwrap_or_default();
        let is_override = fields
            .get("is_override")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let groups = match take_groups(&mut fields, "aliyot", &id)? {
            Some(groups) if !groups.is_empty() => groups,
            _ => {
                let verses = take_verses(&mut fields)?;
                if verses.is_empty() {
                    return Err(DocumentError::Malformed {
                        id,
                        reason: "no verse groups and no verse list".to_string(),
                    });
                }
                debug!("Document '{}' has no verse groups; wrapping {} verses in one group", id, verses.len());
                vec![VerseGroup::new(1, &reference, verses)]
            }
        };

        let supplementary = take_group(&mut fields, "haftara", &id)?;

        let mut alternates = BTreeMap::new();
        for tradition in Tradition::ALL.iter().filter(|t| !t.is_default()) {
            let alternate = AlternateReading {
                groups: take_groups(&mut fields, &format!("aliyot_{}", tradition.id()), &id)?
                    .unwrap_or_default(),
                supplementary: take_group(&mut fields, &format!("haftara_{}", tradition.id()), &id)?,
                reference: string_field(&fields, &format!("ref_{}", tradition.id())),
            };
            if alternate != AlternateReading::default() {
                alternates.insert(*tradition, alternate);
            }
        }

        Ok(Self {
            id,
            name,
            hebrew,
            reference,
            groups,
            supplementary,
            alternates,
            is_override,
        })
    }

    /// Load a document from a JSON file; the file stem is the fallback id.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let fallback_id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_json_str(&json, &fallback_id)
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// Absent or null keys are `None`; a present key must hold an array.
fn take_groups(
    fields: &mut Map<String, Value>,
    key: &str,
    id: &str,
) -> Result<Option<Vec<VerseGroup>>, DocumentError> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Array(_)) => {
            let mut groups: Vec<VerseGroup> = serde_json::from_value(value)?;
            groups.retain(|group| {
                let keep = !group.verses.is_empty();
                if !keep {
                    warn!("Dropping empty verse group {} from '{}' ({})", group.num, id, key);
                }
                keep
            });
            Ok(Some(groups))
        }
        Some(_) => Err(DocumentError::Malformed {
            id: id.to_string(),
            reason: format!("'{}' must be a list of verse groups", key),
        }),
    }
}

fn take_group(
    fields: &mut Map<String, Value>,
    key: &str,
    id: &str,
) -> Result<Option<VerseGroup>, DocumentError> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let group: VerseGroup = serde_json::from_value(value)?;
            if group.verses.is_empty() {
                warn!("Dropping empty supplementary reading from '{}' ({})", id, key);
                return Ok(None);
            }
            Ok(Some(group))
        }
    }
}

fn take_verses(fields: &mut Map<String, Value>) -> Result<Vec<Verse>, DocumentError> {
    match fields.remove("verses") {
        Some(value @ Value::Array(_)) => Ok(serde_json::from_value(value)?),
        _ => Ok(Vec::new()),
    }
}
