//! Download file names.

use chrono::NaiveDate;
use sheetsift_model::Action;

use crate::error::{OutputError, Result};

/// Extension of every produced file.
pub const XLSX_EXTENSION: &str = ".xlsx";

/// Date stamp used in default names, e.g. `07_03_2025`.
pub const DATE_STAMP_FORMAT: &str = "%d_%m_%Y";

/// Characters that cannot appear in a file name on common platforms.
const RESERVED_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Default file stem: `<prefix>_<column>_<DD_MM_YYYY>`.
///
/// Reserved file name characters inside the column name are replaced by `_`.
pub fn default_file_stem(action: Action, column: &str, date: NaiveDate) -> String {
    let column = column.replace(RESERVED_CHARS, "_");
    format!(
        "{}_{}_{}",
        action.file_prefix(),
        column,
        date.format(DATE_STAMP_FORMAT)
    )
}

/// Final download name. The override is kept as typed; a blank one falls
/// back to `default_stem`. `.xlsx` is appended unless already present in
/// any letter case.
pub fn resolve_file_name(override_name: Option<&str>, default_stem: &str) -> Result<String> {
    let name = match override_name {
        Some(name) if !name.trim().is_empty() => {
            if name.contains(['/', '\\']) {
                return Err(OutputError::InvalidFileName {
                    name: name.to_string(),
                    reason: "path separators are not allowed",
                });
            }
            name
        }
        _ => default_stem,
    };
    if has_xlsx_extension(name) {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}{XLSX_EXTENSION}"))
    }
}

fn has_xlsx_extension(name: &str) -> bool {
    name.len() >= XLSX_EXTENSION.len()
        && name
            .get(name.len() - XLSX_EXTENSION.len()..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(XLSX_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn default_stems_follow_the_action() {
        assert_eq!(
            default_file_stem(Action::Filter, "Estado", date()),
            "facturas_Estado_07_03_2025"
        );
        assert_eq!(
            default_file_stem(Action::Sort, "Importe", date()),
            "facturas_ordenadas_Importe_07_03_2025"
        );
        assert_eq!(
            default_file_stem(Action::FilterThenSort, "IVA/Total", date()),
            "facturas_IVA_Total_07_03_2025"
        );
        assert_eq!(
            default_file_stem(Action::Filter, "Unnamed: 1", date()),
            "facturas_Unnamed_ 1_07_03_2025"
        );
        assert_eq!(
            default_file_stem(Action::Sort, "a*b?\"c<d>e|f", date()),
            "facturas_ordenadas_a_b__c_d_e_f_07_03_2025"
        );
    }

    #[test]
    fn appends_extension_once() {
        assert_eq!(resolve_file_name(Some("reporte"), "x").unwrap(), "reporte.xlsx");
        assert_eq!(
            resolve_file_name(Some("reporte.xlsx"), "x").unwrap(),
            "reporte.xlsx"
        );
        assert_eq!(
            resolve_file_name(Some("Reporte.XLSX"), "x").unwrap(),
            "Reporte.XLSX"
        );
        assert_eq!(
            resolve_file_name(Some("reporte.xls"), "x").unwrap(),
            "reporte.xls.xlsx"
        );
    }

    #[test]
    fn blank_override_uses_default() {
        assert_eq!(
            resolve_file_name(Some("   "), "facturas_Estado_07_03_2025").unwrap(),
            "facturas_Estado_07_03_2025.xlsx"
        );
        assert_eq!(resolve_file_name(None, "stem").unwrap(), "stem.xlsx");
    }

    #[test]
    fn override_is_kept_as_typed() {
        assert_eq!(
            resolve_file_name(Some(" reporte final "), "x").unwrap(),
            " reporte final .xlsx"
        );
        assert_eq!(
            resolve_file_name(Some("reporte.xlsx "), "x").unwrap(),
            "reporte.xlsx .xlsx"
        );
    }

    #[test]
    fn rejects_path_separators() {
        assert!(matches!(
            resolve_file_name(Some("../reporte"), "x"),
            Err(OutputError::InvalidFileName { .. })
        ));
    }
}
