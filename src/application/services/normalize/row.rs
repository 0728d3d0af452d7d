use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::application::services::normalize::date::parse_any_date;
use crate::domain::documents::document::DocumentFields;
use crate::domain::documents::status::DocumentStatus;

/// One sheet row as emitted by the external sheet parser.
pub type RawRow = JsonMap<String, JsonValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Code,
    Title,
    Detail,
    Revision,
    Owner,
    Status,
    Area,
    Participants,
    StartDate,
    EndDate,
    BaselineDate,
}

/// Accepted source columns per field, highest priority first. Adding a
/// column variant only needs an entry here.
pub const FIELD_ALIASES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::Code,
        &["Codigo", "Código", "codigo", "Code", "code", "Documento", "Nº"],
    ),
    (
        CanonicalField::Title,
        &["Titulo", "Título", "titulo", "Title", "title", "Nome"],
    ),
    (
        CanonicalField::Detail,
        &["Detalhe", "detalhe", "Descricao", "Descrição", "Detail", "detail"],
    ),
    (
        CanonicalField::Revision,
        &["Revisao", "Revisão", "revisao", "Rev", "Revision", "revision"],
    ),
    (
        CanonicalField::Owner,
        &["Responsavel", "Responsável", "responsavel", "Owner", "owner"],
    ),
    (
        CanonicalField::Status,
        &["Status", "status", "Situação", "situacao"],
    ),
    (
        CanonicalField::Area,
        &["Disciplina", "disciplina", "Area", "Área", "area"],
    ),
    (
        CanonicalField::Participants,
        &["Participantes", "participantes", "Participants", "participants"],
    ),
    (
        CanonicalField::StartDate,
        &[
            "Data_inicio",
            "Data Inicio",
            "Data Início",
            "data_inicio",
            "Inicio",
            "Start",
            "start_date",
        ],
    ),
    (
        CanonicalField::EndDate,
        &["Data_fim", "Data Fim", "data_fim", "Fim", "End", "end_date"],
    ),
    (
        CanonicalField::BaselineDate,
        &["Data_baseline", "Data Baseline", "data_baseline", "Baseline"],
    ),
];

const PARTICIPANT_DELIMITERS: &[char] = &[';', ',', '\n'];

pub fn aliases_for(field: CanonicalField) -> &'static [&'static str] {
    FIELD_ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Resolves the raw cell for a field: exact alias match in priority order,
/// then a case-insensitive pass over the row's keys. Null cells are skipped.
pub fn lookup(row: &RawRow, field: CanonicalField) -> Option<&JsonValue> {
    let aliases = aliases_for(field);
    for alias in aliases {
        match row.get(*alias) {
            Some(JsonValue::Null) | None => continue,
            Some(v) => return Some(v),
        }
    }
    for alias in aliases {
        let wanted = alias.to_lowercase();
        let hit = row
            .iter()
            .find(|(k, v)| !v.is_null() && k.trim().to_lowercase() == wanted);
        if let Some((_, v)) = hit {
            return Some(v);
        }
    }
    None
}

/// Maps a raw row onto document fields. Never fails; unusable cells fall
/// back to empty text, `None` dates and the default status.
pub fn normalize_row(row: &RawRow) -> DocumentFields {
    let text = |field| lookup(row, field).map(cell_text).unwrap_or_default();
    let date = |field| lookup(row, field).and_then(cell_date);

    DocumentFields {
        code: text(CanonicalField::Code),
        title: text(CanonicalField::Title),
        detail: text(CanonicalField::Detail),
        revision: text(CanonicalField::Revision),
        owner: text(CanonicalField::Owner),
        status: DocumentStatus::from_raw(&text(CanonicalField::Status)),
        area: text(CanonicalField::Area),
        participants: split_participants(&text(CanonicalField::Participants)),
        start_date: date(CanonicalField::StartDate),
        end_date: date(CanonicalField::EndDate),
        baseline_date: date(CanonicalField::BaselineDate),
    }
}

pub fn cell_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Serial numbers (also as text), textual dates and serialized native dates
/// are accepted.
pub fn cell_date(value: &JsonValue) -> Option<NaiveDate> {
    match value {
        JsonValue::Number(n) => n.as_f64().and_then(serial_to_date),
        JsonValue::String(s) => {
            let s = s.trim();
            parse_any_date(s)
                .or_else(|| native_date(s))
                .or_else(|| s.parse::<f64>().ok().and_then(serial_to_date))
        }
        _ => None,
    }
}

/// Spreadsheet serial day numbers count from 1899-12-30.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn native_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        // literal date as written, no zone shift
        return Some(dt.naive_local().date());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

pub fn split_participants(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in raw.split(PARTICIPANT_DELIMITERS) {
        let name = name.trim();
        if !name.is_empty() && !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: JsonValue) -> RawRow {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("row fixtures must be objects"),
        }
    }

    #[test]
    fn alias_and_case_variants_resolve_to_same_status() {
        let a = normalize_row(&row(json!({"Situação": "Finalizado"})));
        let b = normalize_row(&row(json!({"status": "finalizado"})));
        assert_eq!(a.status, DocumentStatus::Finished);
        assert_eq!(a.status, b.status);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let fields = normalize_row(&row(json!({"Unrelated": "x", "Other": 3})));
        assert_eq!(fields, DocumentFields::default());
        assert!(fields.is_blank());
    }

    #[test]
    fn first_listed_alias_wins_over_later_ones() {
        let fields = normalize_row(&row(json!({
            "Baseline": "01/01/2024",
            "Data_baseline": "2024-02-01",
        })));
        assert_eq!(fields.baseline_date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn null_cells_are_skipped_in_favour_of_next_alias() {
        let fields = normalize_row(&row(json!({"Status": null, "situacao": "Em andamento"})));
        assert_eq!(fields.status, DocumentStatus::InProgress);
    }

    #[test]
    fn empty_string_counts_as_a_defined_value() {
        let fields = normalize_row(&row(json!({"Disciplina": "", "disciplina": "Civil"})));
        assert_eq!(fields.area, "");
    }

    #[test]
    fn case_insensitive_pass_matches_unlisted_spellings() {
        let fields = normalize_row(&row(json!({
            "DISCIPLINA": "Elétrica",
            "data baseline": "15/03/2024",
            " TITULO ": "Diagrama unifilar",
        })));
        assert_eq!(fields.area, "Elétrica");
        assert_eq!(fields.title, "Diagrama unifilar");
        assert_eq!(fields.baseline_date, NaiveDate::from_ymd_opt(2024, 3, 15));
    }

    #[test]
    fn dates_accept_serials_text_and_native_values() {
        let fields = normalize_row(&row(json!({
            "Data_inicio": 45292,
            "Data_fim": "2024-01-31T03:00:00.000Z",
            "Baseline": "garbage",
        })));
        assert_eq!(fields.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(fields.end_date, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(fields.baseline_date, None);
    }

    #[test]
    fn serial_numbers_sent_as_text_are_dates() {
        let fields = normalize_row(&row(json!({
            "Data_inicio": "45292",
            "Data_fim": " 45322.75 ",
            "Baseline": "-3",
        })));
        assert_eq!(fields.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(fields.end_date, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(fields.baseline_date, None);
    }

    #[test]
    fn numeric_cells_render_without_fraction() {
        let fields = normalize_row(&row(json!({"Revisao": 2, "Codigo": 101.5})));
        assert_eq!(fields.revision, "2");
        assert_eq!(fields.code, "101.5");
    }

    #[test]
    fn participants_are_split_trimmed_and_deduplicated() {
        let fields = normalize_row(&row(json!({
            "Participantes": "Ana; Bruno , Ana;\nCarla;;"
        })));
        assert_eq!(fields.participants, vec!["Ana", "Bruno", "Carla"]);
    }

    #[test]
    fn every_field_has_aliases() {
        for (field, aliases) in FIELD_ALIASES {
            assert!(!aliases.is_empty(), "{field:?} has no aliases");
        }
        assert_eq!(aliases_for(CanonicalField::Status)[2], "Situação");
    }
}
