mod converters;
mod headers;
mod normalize;
mod records;
mod types;

pub use converters::{excel_date_to_iso_string, process_cell_value};
pub use headers::{EMPTY_HEADER, header_row_index, infer_headers};
pub use normalize::{
    DimensionScope, DimensionSplitter, HEIGHT_COLUMN, LAYOUT_COLUMN, LAYOUT_NAME_COLUMN,
    WIDTH_COLUMN, is_dimension_header, parse_dimensions, rename_layout_column,
};
pub use records::{sheet_to_padded_records, sheet_to_records};
pub use types::{Column, Row, Rows, cell_text, display_value};
