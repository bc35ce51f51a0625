use crate::core::labels::RecordLabels;
use crate::domain::client::{Client, ClientProfile};
use crate::domain::loan::LoanSnapshot;
use crate::utils::error::Result;
use crate::utils::validation::validate_single_line;

/// Builds the text of a client record line by line. The header and the
/// section marker are written on construction; loans are appended in order.
pub struct RecordWriter<'a> {
    labels: &'a RecordLabels,
    lines: Vec<String>,
}

impl<'a> RecordWriter<'a> {
    pub fn new(labels: &'a RecordLabels, profile: &ClientProfile) -> Self {
        let mut lines: Vec<String> = labels
            .header
            .iter()
            .zip(profile.fields())
            .map(|(label, (_, value))| format!("{}{}", label, value))
            .collect();
        lines.push(labels.section_marker.to_string());
        Self { labels, lines }
    }

    pub fn loan(mut self, loan: &LoanSnapshot) -> Self {
        let [id, principal, rate, period, collateral, balance, installment] = self.labels.loan;
        // f64 Display is the shortest form that parses back to the same value.
        self.lines.extend([
            format!("{}{}", id, loan.loan_id),
            format!("{}{}", principal, loan.principal),
            format!("{}{}%", rate, loan.rate),
            format!("{}{}", period, loan.period_months),
            format!("{}{}", collateral, loan.collateral),
            format!("{}{}", balance, loan.balance),
            format!("{}{}", installment, loan.installment),
        ]);
        self
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Serializes a client. Values that would break the line structure are
/// rejected instead of written.
pub fn write_record(client: &Client, labels: &RecordLabels) -> Result<String> {
    for (field, value) in client.profile().fields() {
        validate_single_line(field, value)?;
    }

    let mut writer = RecordWriter::new(labels, client.profile());
    for loan in client.loans() {
        validate_single_line("loan number", loan.loan_id())?;
        validate_single_line("collateral", loan.collateral())?;
        writer = writer.loan(&loan.snapshot());
    }

    tracing::debug!(
        client_id = %client.client_id(),
        lines = writer.line_count(),
        "serialized client record"
    );
    Ok(writer.finish())
}
