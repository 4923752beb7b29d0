//! Surface-independent description of one rendered view.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Cyan,
    Green,
    Magenta,
    Yellow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub align: Align,
    pub accent: Option<Accent>,
}

impl Column {
    pub fn left(header: &'static str, accent: Accent) -> Self {
        Self {
            header,
            align: Align::Left,
            accent: Some(accent),
        }
    }

    pub fn right(header: &'static str, accent: Option<Accent>) -> Self {
        Self {
            header,
            align: Align::Right,
            accent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// Row crossed its alert threshold
    pub breach: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub body: String,
    pub accent: Accent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBody {
    Table(TableView),
    Panels(Vec<Panel>),
}

/// Standing alert shown next to the frame while breaches persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBanner {
    pub heading: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    pub title: String,
    pub body: FrameBody,
    pub banner: Option<AlertBanner>,
}

impl DisplayFrame {
    pub fn table(&self) -> Option<&TableView> {
        match &self.body {
            FrameBody::Table(table) => Some(table),
            FrameBody::Panels(_) => None,
        }
    }

    pub fn panels(&self) -> &[Panel] {
        match &self.body {
            FrameBody::Panels(panels) => panels,
            FrameBody::Table(_) => &[],
        }
    }

    pub fn breaching_rows(&self) -> usize {
        self.table()
            .map(|table| table.rows.iter().filter(|row| row.breach).count())
            .unwrap_or(0)
    }
}
