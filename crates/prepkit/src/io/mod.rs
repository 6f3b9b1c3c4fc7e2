//! File input and output: delimited text, workbooks, JSON, dictionaries and
//! directory listings.

mod dictionary;
mod directory;
mod file_data;
mod reader;
mod writer;

pub use dictionary::{
    one_to_many_dictionary, one_to_many_dictionary_from_rows, one_to_one_dictionary,
    one_to_one_dictionary_from_rows, DictionaryOptions,
};
pub use directory::{directory_files, directory_files_or_throw, DirectoryOptions};
pub use file_data::{FileData, FileSource};
pub use reader::{
    column_values, indexed_column_values, is_valid_csv, parse_delimited, read_csv_rows,
    read_csv_rows_or_throw, read_excel_rows, read_excel_rows_or_throw, read_json_file_as_object,
    read_json_sync_or_throw, read_rows, read_rows_or_throw, Delimiter, ReadOptions, Row,
    EXCEL_EXTENSIONS,
};
pub use writer::{
    clear_file, file_name_timestamp, indented_stringify, timestamped_path, write_json,
    write_rows_to_csv, FILE_NAME_TIMESTAMP_FORMAT,
};
