pub mod input_buffer;
pub mod markup;
