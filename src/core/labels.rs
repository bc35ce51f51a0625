/// Line prefixes used when writing a client record. Each prefix ends with the
/// `": "` separator the reader splits on; padding after it is cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLabels {
    pub header: [&'static str; HEADER_LINES],
    pub section_marker: &'static str,
    pub loan: [&'static str; LOAN_LINES],
}

pub const HEADER_LINES: usize = 8;
pub const LOAN_LINES: usize = 7;
/// 0-based index of the first loan line.
pub const LOAN_SECTION_START: usize = HEADER_LINES + 1;
pub const FIELD_SEPARATOR: &str = ": ";

/// Label text of files produced by the original lending-office tool.
pub const LEGACY_LABELS: RecordLabels = RecordLabels {
    header: [
        "Nombre:     ",
        "Apellido:   ",
        "Direccion:  ",
        "Sector:     ",
        "Provincia:  ",
        "Telefono:   ",
        "Celular:    ",
        "Email:      ",
    ],
    section_marker: "PRESTAMOS",
    loan: [
        "- Numero de prestamo: ",
        "  Monto:              ",
        "  Tasa de Interes:    ",
        "  Periodo:            ",
        "  Garantia:           ",
        "  Balance:            ",
        "  Cuota mensual:      ",
    ],
};

pub const ENGLISH_LABELS: RecordLabels = RecordLabels {
    header: [
        "Name:      ",
        "Surname:   ",
        "Address:   ",
        "Sector:    ",
        "Province:  ",
        "Phone:     ",
        "Mobile:    ",
        "Email:     ",
    ],
    section_marker: "LOANS",
    loan: [
        "- Loan number:  ",
        "  Principal:    ",
        "  Rate:         ",
        "  Period:       ",
        "  Collateral:   ",
        "  Balance:      ",
        "  Installment:  ",
    ],
};

impl RecordLabels {
    pub fn select(preserve_legacy_labels: bool) -> &'static RecordLabels {
        if preserve_legacy_labels {
            &LEGACY_LABELS
        } else {
            &ENGLISH_LABELS
        }
    }
}

/// The reader parses by position, so either label set's marker is accepted.
pub fn is_section_marker(line: &str) -> bool {
    let line = line.trim();
    line == LEGACY_LABELS.section_marker || line == ENGLISH_LABELS.section_marker
}
