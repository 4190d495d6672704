use crate::config::node::CsvSettings;
use crate::domain::model::{Record, Row};
use crate::utils::error::{NodeError, Result};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, WriterBuilder};
use serde_json::Value;

/// CSV reader/writer bound to one node's settings.
#[derive(Debug, Clone, Copy)]
pub struct CsvCodec<'s> {
    settings: &'s CsvSettings,
}

impl<'s> CsvCodec<'s> {
    pub fn new(settings: &'s CsvSettings) -> Self {
        Self { settings }
    }

    /// Serializes records to CSV text, header line first.
    ///
    /// Columns come from the template when one is configured, otherwise from
    /// the key order of the first keyed record. Missing keys become empty
    /// fields.
    pub fn write_records(&self, records: &[Record]) -> Result<String> {
        let columns: Option<Vec<&str>> = match &self.settings.template {
            Some(template) => Some(template.iter().map(String::as_str).collect()),
            None => records.iter().find_map(|record| match record {
                Record::Keyed(row) => Some(row.keys().map(String::as_str).collect()),
                Record::Positional(_) => None,
            }),
        };

        let mut writer = WriterBuilder::new()
            .delimiter(self.settings.delimiter)
            .quote(self.settings.quote)
            .has_headers(false)
            .flexible(true)
            .from_writer(Vec::new());

        if let Some(columns) = &columns {
            writer.write_record(columns)?;
        }

        for (index, record) in records.iter().enumerate() {
            let cells: Vec<String> = match (record, &columns) {
                (Record::Keyed(row), Some(columns)) => columns
                    .iter()
                    .map(|column| row.get(*column).map(cell_text).unwrap_or_default())
                    .collect(),
                (Record::Keyed(row), None) => row.values().map(cell_text).collect(),
                (Record::Positional(values), Some(columns)) => {
                    if values.len() > columns.len() {
                        tracing::warn!(
                            "Record {} has {} cells for {} columns, extra cells dropped",
                            index,
                            values.len(),
                            columns.len()
                        );
                    }
                    (0..columns.len())
                        .map(|i| values.get(i).map(cell_text).unwrap_or_default())
                        .collect()
                }
                (Record::Positional(values), None) => values.iter().map(cell_text).collect(),
            };
            writer.write_record(&cells)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| NodeError::IoError(e.into_error()))?;

        String::from_utf8(bytes).map_err(|e| NodeError::ProcessingError {
            message: format!("CSV output is not valid UTF-8: {}", e),
        })
    }

    /// Lazily parses CSV text into rows.
    pub fn rows<'a>(&'a self, text: &'a str) -> RowReader<'a> {
        let records = ReaderBuilder::new()
            .delimiter(self.settings.delimiter)
            .quote(self.settings.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes())
            .into_records();

        RowReader {
            records,
            template: self.settings.template.as_deref(),
            header: None,
            consumed: 0,
        }
    }

    /// Parses every row before returning; row order follows the input.
    pub fn parse(&self, text: &str) -> Result<Vec<Row>> {
        self.rows(text).collect()
    }
}

/// Row producer over CSV text. Resolves the header on the first record
/// unless a template is configured.
pub struct RowReader<'a> {
    records: StringRecordsIntoIter<&'a [u8]>,
    template: Option<&'a [String]>,
    header: Option<Vec<String>>,
    consumed: usize,
}

impl<'a> Iterator for RowReader<'a> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };
            self.consumed += 1;

            if self.template.is_none() && self.header.is_none() {
                self.header = Some(record.iter().map(str::to_string).collect());
                continue;
            }

            // 與 template 完全相同的首行視為 header，略過
            if let Some(template) = self.template {
                if self.consumed == 1 && record.iter().eq(template.iter().map(String::as_str)) {
                    tracing::debug!("First line repeats the template, treating it as header");
                    continue;
                }
            }

            let columns = self
                .template
                .or(self.header.as_deref())
                .unwrap_or_default();
            return Some(Ok(build_row(columns, &record)));
        }
    }
}

fn build_row(columns: &[String], record: &StringRecord) -> Row {
    if record.len() > columns.len() {
        tracing::warn!(
            "Line {} has {} fields for {} columns, extra fields dropped",
            record.position().map(|p| p.line()).unwrap_or_default(),
            record.len(),
            columns.len()
        );
    }

    let mut row = Row::new();
    for (i, column) in columns.iter().enumerate() {
        let cell = record.get(i).unwrap_or_default();
        row.insert(column.clone(), Value::String(cell.to_string()));
    }
    row
}

/// Text written for a single cell.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}
