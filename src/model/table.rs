//! Table types.

use super::theme::{
    Color, Role, TextStyle, Theme, TABLE_ALT_FILL, TABLE_CELL_BORDER, TABLE_HEADER_BORDER,
    TABLE_HEADER_FILL, TABLE_PLAIN_FILL,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Horizontal alignment of cell text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

/// Shading class of a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowShade {
    /// Tinted row (even row index)
    Alt,
    /// Untinted row (odd row index)
    Plain,
}

impl RowShade {
    /// Shade for a 0-indexed data row. Even rows are `Alt`.
    pub fn for_row(row_index: usize) -> Self {
        if row_index % 2 == 0 {
            RowShade::Alt
        } else {
            RowShade::Plain
        }
    }

    /// Background fill for this shade.
    pub fn fill(self) -> Color {
        match self {
            RowShade::Alt => TABLE_ALT_FILL,
            RowShade::Plain => TABLE_PLAIN_FILL,
        }
    }
}

/// A rectangular grid of header labels and stringified rows.
///
/// Every row has exactly one cell per header; the constructor enforces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableModel {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Option<Vec<f32>>,
    alignments: Option<Vec<Alignment>>,
}

impl TableModel {
    /// Create a table, failing with [`Error::ShapeMismatch`] when a row's
    /// length differs from the header count.
    pub fn new<H, R, C, S>(headers: H, rows: R) -> Result<Self>
    where
        H: IntoIterator<Item = S>,
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let mut grid = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            let row: Vec<String> = row.into_iter().map(Into::into).collect();
            if row.len() != headers.len() {
                return Err(Error::ShapeMismatch {
                    row: index,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
            grid.push(row);
        }
        Ok(Self {
            headers,
            rows: grid,
            column_widths: None,
            alignments: None,
        })
    }

    /// Set explicit column widths in points, one per header.
    ///
    /// Every width must be positive and finite.
    pub fn with_column_widths(mut self, widths: Vec<f32>) -> Result<Self> {
        if widths.len() != self.headers.len() {
            return Err(Error::InvalidColumnWidths {
                expected: self.headers.len(),
                found: widths.len(),
            });
        }
        if let Some((column, &width)) = widths
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(Error::ColumnWidth { column, width });
        }
        self.column_widths = Some(widths);
        Ok(self)
    }

    /// Set per-column alignment, one per header.
    pub fn with_alignments(mut self, alignments: Vec<Alignment>) -> Result<Self> {
        if alignments.len() != self.headers.len() {
            return Err(Error::InvalidDeck(format!(
                "{} alignments given for {} columns",
                alignments.len(),
                self.headers.len()
            )));
        }
        self.alignments = Some(alignments);
        Ok(self)
    }

    /// Column labels.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Explicit column widths, if any.
    pub fn column_widths(&self) -> Option<&[f32]> {
        self.column_widths.as_deref()
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn alignment(&self, column: usize) -> Alignment {
        self.alignments
            .as_ref()
            .and_then(|a| a.get(column).copied())
            .unwrap_or_default()
    }

    /// Resolve widths against the container width.
    ///
    /// Widths are passed through unchanged unless their sum exceeds the
    /// container, in which case they are scaled down proportionally.
    fn resolved_widths(&self, container_width: f32) -> Option<Vec<f32>> {
        let widths = self.column_widths.as_ref()?;
        let total: f32 = widths.iter().sum();
        if total > container_width && total > 0.0 {
            let scale = container_width / total;
            log::warn!(
                "Column widths sum to {:.1}pt but the container is {:.1}pt; scaling by {:.3}",
                total,
                container_width,
                scale
            );
            Some(widths.iter().map(|w| w * scale).collect())
        } else {
            Some(widths.clone())
        }
    }

    /// Build the styled grid for a container of the given width.
    pub fn styled(&self, theme: &Theme, container_width: f32) -> StyledTable {
        let header_style = theme.resolve(Role::TableHeader);
        let cell_style = theme.resolve(Role::TableCell);

        let header = self
            .headers
            .iter()
            .enumerate()
            .map(|(column, text)| StyledCell {
                text: text.clone(),
                style: header_style.clone(),
                fill: TABLE_HEADER_FILL,
                border: TABLE_HEADER_BORDER,
                alignment: self.alignment(column),
                shade: None,
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let shade = RowShade::for_row(row_index);
                row.iter()
                    .enumerate()
                    .map(|(column, text)| StyledCell {
                        text: text.clone(),
                        style: cell_style.clone(),
                        fill: shade.fill(),
                        border: TABLE_CELL_BORDER,
                        alignment: self.alignment(column),
                        shade: Some(shade),
                    })
                    .collect()
            })
            .collect();

        StyledTable {
            column_widths: self.resolved_widths(container_width),
            header,
            rows,
        }
    }
}

/// A table with every cell styled, ready for an output sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledTable {
    /// Column widths in points; `None` lets the sink split evenly
    pub column_widths: Option<Vec<f32>>,
    /// Header cells
    pub header: Vec<StyledCell>,
    /// Data rows
    pub rows: Vec<Vec<StyledCell>>,
}

impl StyledTable {
    /// Plain text rendering, one tab-separated line per row.
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.header)
            .chain(self.rows.iter())
            .map(|row| {
                row.iter()
                    .map(|c| c.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single styled table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledCell {
    /// Cell text
    pub text: String,
    /// Text style
    pub style: TextStyle,
    /// Background fill
    pub fill: Color,
    /// Border color on all four edges
    pub border: Color,
    /// Horizontal alignment
    pub alignment: Alignment,
    /// Row shade (data cells only)
    pub shade: Option<RowShade>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableModel {
        TableModel::new(
            ["Term", "Definition"],
            [
                ["UAS", "Unmanned Aerial System"],
                ["IMM", "Interacting Multiple Model"],
                ["GNN", "Global Nearest Neighbour"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_table_shape() {
        let table = sample();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_empty_rows() {
        let table = TableModel::new(["A"], Vec::<Vec<&str>>::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = TableModel::new(
            vec!["A", "B"],
            vec![vec!["1", "2"], vec!["3", "4", "5"]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                row: 1,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_short_row_mismatch() {
        let err = TableModel::new(vec!["A", "B"], vec![vec!["1"]]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { found: 1, .. }));
    }

    #[test]
    fn test_row_shade_parity() {
        for row in 0..10 {
            let shade = RowShade::for_row(row);
            assert_eq!(shade == RowShade::Alt, row % 2 == 0);
        }
    }

    #[test]
    fn test_styled_cells() {
        let theme = Theme::default();
        let styled = sample().styled(&theme, 800.0);

        assert!(styled.header.iter().all(|c| c.fill == TABLE_HEADER_FILL));
        assert!(styled.header.iter().all(|c| c.style.bold));
        assert_eq!(styled.rows[0][0].fill, TABLE_ALT_FILL);
        assert_eq!(styled.rows[1][0].fill, TABLE_PLAIN_FILL);
        assert_eq!(styled.rows[2][1].shade, Some(RowShade::Alt));
        assert_eq!(styled.rows[1][1].border, TABLE_CELL_BORDER);
        assert!(styled.column_widths.is_none());
    }

    #[test]
    fn test_column_widths_pass_through() {
        let table = sample().with_column_widths(vec![100.8, 374.4]).unwrap();
        let styled = table.styled(&Theme::default(), 873.6);
        assert_eq!(styled.column_widths, Some(vec![100.8, 374.4]));
    }

    #[test]
    fn test_column_widths_scaled_when_too_wide() {
        let table = sample().with_column_widths(vec![300.0, 700.0]).unwrap();
        let styled = table.styled(&Theme::default(), 500.0);
        let widths = styled.column_widths.unwrap();
        assert!((widths[0] - 150.0).abs() < 1e-3);
        assert!((widths[1] - 350.0).abs() < 1e-3);
    }

    #[test]
    fn test_column_widths_length_checked() {
        let err = sample().with_column_widths(vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidColumnWidths {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_column_widths_must_be_positive() {
        let err = sample().with_column_widths(vec![-500.0, 2000.0]).unwrap_err();
        assert!(matches!(err, Error::ColumnWidth { column: 0, .. }));

        assert!(matches!(
            sample().with_column_widths(vec![100.0, 0.0]),
            Err(Error::ColumnWidth { column: 1, .. })
        ));
        assert!(sample().with_column_widths(vec![f32::NAN, 10.0]).is_err());
        assert!(sample().with_column_widths(vec![f32::INFINITY, 10.0]).is_err());
    }

    #[test]
    fn test_alignments() {
        let table = sample()
            .with_alignments(vec![Alignment::Center, Alignment::Left])
            .unwrap();
        let styled = table.styled(&Theme::default(), 800.0);
        assert_eq!(styled.header[0].alignment, Alignment::Center);
        assert_eq!(styled.rows[2][0].alignment, Alignment::Center);
        assert!(sample().with_alignments(vec![]).is_err());
    }

    #[test]
    fn test_plain_text() {
        let styled = sample().styled(&Theme::default(), 800.0);
        let text = styled.plain_text();
        assert!(text.starts_with("Term\tDefinition\n"));
        assert_eq!(text.lines().count(), 4);
    }
}
