pub mod command_reader;
pub mod product_writer;
