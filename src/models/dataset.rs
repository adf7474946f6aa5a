//! Dataset model: ordered records plus the column layout of their artifact

use super::record::{
    Annotation, Record, RecordFields, CATEGORY_ANNOTATED_COLUMN, MODIFIED_FLAG_COLUMN,
    REQUIRED_COLUMNS,
};

/// Where each header column's value lives on a [`Record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Context,
    Question,
    ExtractedAnswer,
    Category,
    CategoryAnnotated,
    ModifiedFlag,
    /// Index into [`Record::extra`]
    Extra(usize),
}

impl Column {
    fn for_name(name: &str) -> Option<Column> {
        match name {
            "title" => Some(Column::Title),
            "context" => Some(Column::Context),
            "question" => Some(Column::Question),
            "extracted_answer" => Some(Column::ExtractedAnswer),
            "category" => Some(Column::Category),
            CATEGORY_ANNOTATED_COLUMN => Some(Column::CategoryAnnotated),
            MODIFIED_FLAG_COLUMN => Some(Column::ModifiedFlag),
            _ => None,
        }
    }
}

/// A row whose annotation cells disagreed and were discarded on load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardedAnnotation {
    pub position: usize,
    pub category_annotated: String,
    pub modified_flag: String,
}

/// Ordered, in-memory collection of records for one session
#[derive(Debug, Clone)]
pub struct Dataset {
    header: Vec<String>,
    layout: Vec<Column>,
    /// Header width before annotation columns were appended
    source_width: usize,
    extra_count: usize,
    records: Vec<Record>,
}

// Two datasets are equal when they would be written identically, regardless of
// which annotation columns were present in their source.
impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header && self.layout == other.layout && self.records == other.records
    }
}

impl Eq for Dataset {}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

impl Dataset {
    /// Empty dataset with the standard header (required plus annotation columns)
    pub fn new() -> Self {
        let header: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .chain([CATEGORY_ANNOTATED_COLUMN, MODIFIED_FLAG_COLUMN].iter())
            .map(|s| s.to_string())
            .collect();
        Self {
            source_width: header.len(),
            header,
            layout: vec![
                Column::Title,
                Column::Context,
                Column::Question,
                Column::ExtractedAnswer,
                Column::Category,
                Column::CategoryAnnotated,
                Column::ModifiedFlag,
            ],
            extra_count: 0,
            records: Vec::new(),
        }
    }

    /// Build an empty dataset from a source header.
    ///
    /// Fails with a human-readable reason if a required column is missing.
    /// Annotation columns absent from the header are appended. Repeated
    /// column names after the first occurrence are kept as extra columns.
    pub fn with_header(mut header: Vec<String>) -> Result<Self, String> {
        for required in REQUIRED_COLUMNS {
            if !header.iter().any(|h| h == required) {
                return Err(format!("Column '{}' is missing in the input CSV.", required));
            }
        }

        let source_width = header.len();
        for column in [CATEGORY_ANNOTATED_COLUMN, MODIFIED_FLAG_COLUMN] {
            if !header.iter().any(|h| h == column) {
                header.push(column.to_string());
            }
        }

        let mut layout = Vec::with_capacity(header.len());
        let mut extra_count = 0;
        for name in &header {
            let column = match Column::for_name(name) {
                Some(column) if !layout.contains(&column) => column,
                _ => {
                    extra_count += 1;
                    Column::Extra(extra_count - 1)
                }
            };
            layout.push(column);
        }

        Ok(Self {
            header,
            layout,
            source_width,
            extra_count,
            records: Vec::new(),
        })
    }

    /// Column names in artifact order
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    pub(crate) fn get_mut(&mut self, position: usize) -> Option<&mut Record> {
        self.records.get_mut(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record, padding or truncating its extra values to the layout
    pub fn push(&mut self, mut record: Record) {
        record.extra.resize(self.extra_count, String::new());
        self.records.push(record);
    }

    /// Append a row given as cell values in header order.
    ///
    /// The row must have exactly as many cells as the source header; annotation
    /// columns appended by [`Dataset::with_header`] start empty. Rows whose
    /// annotation cells are half-filled or unrecognised are loaded
    /// unannotated and reported back.
    pub fn push_row<'a, I>(&mut self, cells: I) -> Result<Option<DiscardedAnnotation>, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let position = self.records.len();
        let mut fields = RecordFields::default();
        let mut category_annotated = String::new();
        let mut modified_flag = String::new();
        let mut extra = vec![String::new(); self.extra_count];
        let mut count = 0;

        for (index, cell) in cells.into_iter().enumerate() {
            count += 1;
            if index >= self.source_width {
                continue;
            }
            let value = cell.to_string();
            match &self.layout[index] {
                Column::Title => fields.title = value,
                Column::Context => fields.context = value,
                Column::Question => fields.question = value,
                Column::ExtractedAnswer => fields.extracted_answer = value,
                Column::Category => fields.category = value,
                Column::CategoryAnnotated => category_annotated = value,
                Column::ModifiedFlag => modified_flag = value,
                Column::Extra(i) => extra[*i] = value,
            }
        }

        if count != self.source_width {
            return Err(format!(
                "row {} has {} fields but the header has {}",
                position + 1,
                count,
                self.source_width
            ));
        }

        let annotation = Annotation::from_cells(&category_annotated, &modified_flag);
        let discarded = if annotation.is_none()
            && !(category_annotated.is_empty() && modified_flag.is_empty())
        {
            Some(DiscardedAnnotation {
                position,
                category_annotated,
                modified_flag,
            })
        } else {
            None
        };

        self.records.push(Record {
            fields,
            annotation,
            extra,
        });
        Ok(discarded)
    }

    /// Cell values of a record in header order
    pub fn row_values<'a>(&'a self, record: &'a Record) -> Vec<&'a str> {
        self.layout
            .iter()
            .map(|column| match column {
                Column::Title => record.fields.title.as_str(),
                Column::Context => record.fields.context.as_str(),
                Column::Question => record.fields.question.as_str(),
                Column::ExtractedAnswer => record.fields.extracted_answer.as_str(),
                Column::Category => record.fields.category.as_str(),
                Column::CategoryAnnotated => record.category_annotated(),
                Column::ModifiedFlag => record.modified_flag(),
                Column::Extra(i) => record.extra.get(*i).map(String::as_str).unwrap_or(""),
            })
            .collect()
    }
}
