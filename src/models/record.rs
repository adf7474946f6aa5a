//! Record and decision models
//!
//! A record is one dataset row: five immutable text fields read from the input
//! plus an optional annotation. The annotated category and the modified flag
//! are stored together so a row is always either fully annotated or not at all.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Required input columns, in the order they are checked and displayed
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "title",
    "context",
    "question",
    "extracted_answer",
    "category",
];

/// Column holding the annotated category
pub const CATEGORY_ANNOTATED_COLUMN: &str = "category_annotated";

/// Column holding the modified flag
pub const MODIFIED_FLAG_COLUMN: &str = "modified_flag";

/// Fixed set of category labels an annotator can assign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Person,
    Place,
    Quantity,
    Time,
    General,
}

impl Label {
    /// All labels in prompt order
    pub const ALL: [Label; 5] = [
        Label::Person,
        Label::Place,
        Label::Quantity,
        Label::Time,
        Label::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Person => "person",
            Label::Place => "place",
            Label::Quantity => "quantity",
            Label::Time => "time",
            Label::General => "general",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown label '{}'", s))
    }
}

/// What the annotator decided for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep the record's original category ("No Change")
    Confirm,
    /// Replace the category with a label from the fixed set
    Relabel(Label),
}

impl Decision {
    /// Text shown in the prompt for this decision
    pub fn display_name(&self) -> &'static str {
        match self {
            Decision::Confirm => ModifiedFlag::NoChange.as_str(),
            Decision::Relabel(label) => label.as_str(),
        }
    }
}

/// Whether the annotator changed the original category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModifiedFlag {
    #[serde(rename = "Changed")]
    Changed,
    #[serde(rename = "No Change")]
    NoChange,
}

impl ModifiedFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifiedFlag::Changed => "Changed",
            ModifiedFlag::NoChange => "No Change",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Changed" => Some(ModifiedFlag::Changed),
            "No Change" => Some(ModifiedFlag::NoChange),
            _ => None,
        }
    }
}

impl fmt::Display for ModifiedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed annotation: the resulting category and how it was reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub category: String,
    pub flag: ModifiedFlag,
}

impl Annotation {
    /// Build the annotation a decision produces for a record whose current
    /// category is `original`.
    pub fn from_decision(decision: Decision, original: &str) -> Self {
        match decision {
            Decision::Confirm => Self {
                category: original.to_string(),
                flag: ModifiedFlag::NoChange,
            },
            Decision::Relabel(label) => Self {
                category: label.as_str().to_string(),
                flag: ModifiedFlag::Changed,
            },
        }
    }

    /// Parse the two annotation cells of a row. Returns `None` when either
    /// cell is empty or the flag is not recognised.
    pub fn from_cells(category: &str, flag: &str) -> Option<Self> {
        if category.is_empty() {
            return None;
        }
        ModifiedFlag::parse(flag).map(|flag| Self {
            category: category.to_string(),
            flag,
        })
    }
}

/// The five read-only fields shown to the annotator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordFields {
    pub title: String,
    pub context: String,
    pub question: String,
    pub extracted_answer: String,
    pub category: String,
}

impl RecordFields {
    /// Fields paired with their display labels
    pub fn labeled(&self) -> [(&'static str, &str); 5] {
        [
            ("Title", &self.title),
            ("Context", &self.context),
            ("Question", &self.question),
            ("Extracted Answer", &self.extracted_answer),
            ("Category", &self.category),
        ]
    }
}

/// One dataset row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub fields: RecordFields,
    pub annotation: Option<Annotation>,
    /// Values of non-required columns, in dataset column order
    pub extra: Vec<String>,
}

impl Record {
    pub fn new(fields: RecordFields) -> Self {
        Self {
            fields,
            annotation: None,
            extra: Vec::new(),
        }
    }

    pub fn is_annotated(&self) -> bool {
        self.annotation.is_some()
    }

    /// Value written to the `category_annotated` column (empty when unset)
    pub fn category_annotated(&self) -> &str {
        self.annotation
            .as_ref()
            .map(|a| a.category.as_str())
            .unwrap_or("")
    }

    /// Value written to the `modified_flag` column (empty when unset)
    pub fn modified_flag(&self) -> &str {
        self.annotation.as_ref().map(|a| a.flag.as_str()).unwrap_or("")
    }
}
