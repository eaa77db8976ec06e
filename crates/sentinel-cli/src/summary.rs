//! Table rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sentinel_core::PipelineContext;
use sentinel_core::stages::evaluate::EvaluationReport;
use sentinel_ingest::ColumnProfile;
use sentinel_model::{Deployment, DeploymentStatus, Prediction, SchemaAnalysis, Stage};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

/// Stages in order with their labels, successors and reachability in `context`.
pub fn stages_table(context: &PipelineContext) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Stage"),
        header_cell("Label"),
        header_cell("Next"),
        header_cell("Available"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for (index, stage) in Stage::ALL.into_iter().enumerate() {
        let available = if context.can_navigate(stage) {
            Cell::new("yes").fg(Color::Green)
        } else {
            dim_cell("locked")
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(format!("{stage:?}")),
            Cell::new(stage.label()),
            stage.next().map_or_else(|| dim_cell("-"), |next| Cell::new(next.label())),
            available,
        ]);
    }
    table
}

/// Per-column cell kind counts.
pub fn profile_table(profiles: &[ColumnProfile]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Numeric"),
        header_cell("Text"),
        header_cell("Empty"),
    ]);
    apply_table_style(&mut table);
    for index in 2..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for profile in profiles {
        let kind = if profile.is_numeric() {
            Cell::new("numeric").fg(Color::Green)
        } else if profile.text > 0 {
            Cell::new("text").fg(Color::Yellow)
        } else {
            dim_cell("empty")
        };
        let empty = if profile.empty > 0 {
            Cell::new(profile.empty).fg(Color::Yellow)
        } else {
            dim_cell(0)
        };
        table.add_row(vec![
            Cell::new(&profile.name),
            kind,
            Cell::new(profile.numeric),
            Cell::new(profile.text),
            empty,
        ]);
    }
    table
}

pub fn analysis_table(analysis: &SchemaAnalysis) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![header_cell("Target"), Cell::new(&analysis.target_variable)]);
    table.add_row(vec![
        header_cell("Features"),
        Cell::new(analysis.features.join(", ")),
    ]);
    let issues = if analysis.data_issues.is_empty() {
        dim_cell("none reported")
    } else {
        Cell::new(analysis.data_issues.join("\n")).fg(Color::Yellow)
    };
    table.add_row(vec![header_cell("Issues"), issues]);
    table.add_row(vec![header_cell("Summary"), Cell::new(&analysis.summary)]);
    table
}

/// Scores and confusion matrix side by side.
pub fn evaluation_table(report: &EvaluationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Value"),
        header_cell("Outcome"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let rows = report.scores.len().max(report.confusion.len());
    for index in 0..rows {
        let (metric, value) = match report.scores.get(index) {
            Some(line) => (Cell::new(line.label), Cell::new(&line.value)),
            None => (Cell::new(""), Cell::new("")),
        };
        let (outcome, count) = match report.confusion.get(index) {
            Some(line) => (
                Cell::new(line.label),
                Cell::new(&line.value).add_attribute(Attribute::Bold),
            ),
            None => (Cell::new(""), Cell::new("")),
        };
        table.add_row(vec![metric, value, outcome, count]);
    }
    table
}

pub fn deployment_table(deployment: &Deployment) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let status = match deployment.status {
        DeploymentStatus::Active => Cell::new(deployment.status).fg(Color::Green),
        DeploymentStatus::Deploying => Cell::new(deployment.status).fg(Color::Yellow),
        DeploymentStatus::Inactive => dim_cell(deployment.status),
    };
    table.add_row(vec![header_cell("Endpoint"), Cell::new(&deployment.endpoint)]);
    table.add_row(vec![header_cell("Status"), status]);
    table.add_row(vec![header_cell("Version"), Cell::new(&deployment.version)]);
    table.add_row(vec![
        header_cell("Created"),
        Cell::new(deployment.created_at.to_rfc3339()),
    ]);
    table
}

pub fn prediction_table(prediction: &Prediction) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let verdict = if prediction.is_fraud() {
        Cell::new(prediction.prediction)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(prediction.prediction).fg(Color::Green)
    };
    table.add_row(vec![header_cell("Verdict"), verdict]);
    table.add_row(vec![
        header_cell("Probability"),
        Cell::new(format!("{:.1}%", prediction.probability * 100.0)),
    ]);
    table.add_row(vec![header_cell("Reasoning"), Cell::new(&prediction.reasoning)]);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
