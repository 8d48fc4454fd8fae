//! Terminal prompts for the interactive flow.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input, Select};
use polars::prelude::DataFrame;
use sheetsift_core::{CoreError, Prompter, Result, WorkflowResult};
use sheetsift_model::{Action, CellValue, HeaderRow, SortDirection};

use sheetsift_cli::render::{RESULT_DISPLAY_ROWS, print_frame, print_headers, stats_table};

const PREVIEW_TITLE: &str = "Preview:";

pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    /// Header row most recently entered, used when printing headers.
    last_header_row: HeaderRow,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            last_header_row: HeaderRow::FIRST,
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_error(err: dialoguer::Error) -> CoreError {
    CoreError::Prompt {
        message: err.to_string(),
    }
}

impl Prompter for DialoguerPrompter {
    fn header_row(&mut self, suggested: HeaderRow, sheet_rows: usize) -> Result<HeaderRow> {
        let row: usize = Input::with_theme(&self.theme)
            .with_prompt(format!("Header row (1-{sheet_rows})"))
            .default(suggested.get())
            .validate_with(|row: &usize| -> std::result::Result<(), &str> {
                if *row == 0 {
                    Err("rows are numbered from 1")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(prompt_error)?;
        let header_row = HeaderRow::new(row)?;
        self.last_header_row = header_row;
        Ok(header_row)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn choose_action(&mut self) -> Result<Action> {
        let items: Vec<&str> = Action::ALL.iter().map(|action| action.label()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("What do you want to do?")
            .items(&items)
            .default(0)
            .interact()
            .map_err(prompt_error)?;
        Ok(Action::ALL[selection])
    }

    fn choose_column(&mut self, prompt: &str, columns: &[String]) -> Result<String> {
        let selection = FuzzySelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(columns)
            .default(0)
            .interact()
            .map_err(prompt_error)?;
        Ok(columns[selection].clone())
    }

    fn choose_value(&mut self, column: &str, values: &[CellValue]) -> Result<CellValue> {
        let items: Vec<String> = values.iter().map(ToString::to_string).collect();
        let selection = FuzzySelect::with_theme(&self.theme)
            .with_prompt(format!("Value of '{column}'"))
            .items(&items)
            .default(0)
            .max_length(15)
            .interact()
            .map_err(prompt_error)?;
        Ok(values[selection].clone())
    }

    fn choose_direction(&mut self) -> Result<SortDirection> {
        let ascending = Select::with_theme(&self.theme)
            .with_prompt("Sort order")
            .items(&["Ascending", "Descending"])
            .default(0)
            .interact()
            .map_err(prompt_error)?
            == 0;
        Ok(SortDirection::from_descending(!ascending))
    }

    fn file_name(&mut self, default_stem: &str) -> Result<String> {
        Input::with_theme(&self.theme)
            .with_prompt("Save as")
            .default(default_stem.to_string())
            .interact_text()
            .map_err(prompt_error)
    }

    fn show_headers(&mut self, columns: &[String]) {
        print_headers(columns, self.last_header_row);
    }

    fn show_preview(&mut self, preview: &DataFrame) {
        print_frame(PREVIEW_TITLE, preview, preview.height());
    }

    fn show_result(&mut self, result: &WorkflowResult) {
        print_frame(
            &format!(
                "Result: {} of {} rows kept ({})",
                result.table.height(),
                result.source_rows,
                result.action
            ),
            &result.table,
            RESULT_DISPLAY_ROWS,
        );
        println!("{}", stats_table(&result.stats));
    }

    fn warn(&mut self, message: &str) {
        eprintln!("warning: {message}");
    }
}
