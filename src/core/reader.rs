use crate::core::labels::{is_section_marker, FIELD_SEPARATOR, HEADER_LINES, LOAN_LINES};
use crate::domain::client::{Client, ClientProfile};
use crate::domain::loan::{Loan, LoanSnapshot};
use crate::utils::error::{LendingError, Result};
use std::str::FromStr;

/// Walks record lines in order, tracking the position for error reports.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        Self { lines, pos: 0 }
    }

    /// 1-based number of the line `next_line` would return.
    fn line_number(&self) -> usize {
        self.pos + 1
    }

    fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn next_line(&mut self, what: &str) -> Result<&'a str> {
        let line = self.lines.get(self.pos).copied().ok_or_else(|| {
            LendingError::parse(self.line_number(), format!("record ends before the {} line", what))
        })?;
        self.pos += 1;
        Ok(line)
    }

    /// Value of a `label: value` line, split on the first separator and trimmed.
    fn field(&mut self, what: &str) -> Result<&'a str> {
        let line_number = self.line_number();
        let line = self.next_line(what)?;
        line.split_once(FIELD_SEPARATOR)
            .map(|(_, value)| value.trim())
            .ok_or_else(|| {
                LendingError::parse(
                    line_number,
                    format!("expected '<label>: <{}>', found {:?}", what, line),
                )
            })
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let line_number = self.line_number();
        let raw = self.field(what)?;
        parse_number(line_number, what, raw)
    }
}

fn parse_number<T: FromStr>(line_number: usize, what: &str, raw: &str) -> Result<T> {
    raw.parse::<T>().map_err(|_| {
        LendingError::parse(line_number, format!("{} is not a valid number: {:?}", what, raw))
    })
}

fn non_negative(line_number: usize, what: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(LendingError::parse(
            line_number,
            format!("{} must be a finite, non-negative amount, found {}", what, value),
        ));
    }
    Ok(value)
}

fn read_profile(cursor: &mut LineCursor<'_>) -> Result<ClientProfile> {
    Ok(ClientProfile {
        name: cursor.field("name")?.to_string(),
        surname: cursor.field("surname")?.to_string(),
        address: cursor.field("address")?.to_string(),
        sector: cursor.field("sector")?.to_string(),
        province: cursor.field("province")?.to_string(),
        phone: cursor.field("phone")?.to_string(),
        mobile: cursor.field("mobile")?.to_string(),
        email: cursor.field("email")?.to_string(),
    })
}

fn read_loan(cursor: &mut LineCursor<'_>) -> Result<Loan> {
    let first_line = cursor.line_number();
    if cursor.remaining() < LOAN_LINES {
        return Err(LendingError::parse(
            first_line,
            format!(
                "incomplete loan entry: expected {} lines, found {}",
                LOAN_LINES,
                cursor.remaining()
            ),
        ));
    }

    let loan_id = cursor.field("loan number")?.to_string();

    let line = cursor.line_number();
    let principal = non_negative(line, "principal", cursor.number("principal")?)?;

    let line = cursor.line_number();
    let raw_rate = cursor.field("interest rate")?;
    let rate: f64 = parse_number(line, "interest rate", raw_rate.trim_end_matches('%').trim_end())?;
    let rate = non_negative(line, "interest rate", rate)?;

    let line = cursor.line_number();
    let period_months: u32 = cursor.number("period")?;
    if period_months == 0 {
        return Err(LendingError::parse(line, "period must be at least 1 month"));
    }

    let collateral = cursor.field("collateral")?.to_string();

    let balance_line = cursor.line_number();
    let balance = non_negative(balance_line, "balance", cursor.number("balance")?)?;

    let line = cursor.line_number();
    let installment = non_negative(line, "installment", cursor.number("installment")?)?;

    let loan = Loan::restore(LoanSnapshot {
        loan_id,
        principal,
        rate,
        period_months,
        collateral,
        balance,
        installment,
    });

    // Stored numbers are decimal text, so allow rounding noise on the total.
    let ceiling = loan.total_owed() * (1.0 + 1e-9) + 1e-9;
    if loan.balance() > ceiling {
        return Err(LendingError::parse(
            balance_line,
            format!(
                "balance {} exceeds the total owed {}",
                loan.balance(),
                loan.total_owed()
            ),
        ));
    }
    Ok(loan)
}

/// Parses the text of a stored client record. Either the whole client is
/// returned or a parse error; partial clients never escape.
pub fn read_record(client_id: &str, text: &str) -> Result<Client> {
    let mut cursor = LineCursor::new(text);

    let profile = read_profile(&mut cursor)?;
    debug_assert_eq!(cursor.pos, HEADER_LINES);

    let marker_line = cursor.line_number();
    let marker = cursor.next_line("loan section marker")?;
    if !is_section_marker(marker) {
        return Err(LendingError::parse(
            marker_line,
            format!("expected the loan section marker, found {:?}", marker),
        ));
    }

    let mut loans = Vec::new();
    while !cursor.is_exhausted() {
        loans.push(read_loan(&mut cursor)?);
    }

    tracing::debug!(client_id, loans = loans.len(), "parsed client record");
    Ok(Client::from_parts(client_id.to_string(), profile, loans))
}
