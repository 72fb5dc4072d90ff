// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`
// ResultExt adds the `chain_err` trait method.
use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }

    errors {
        InvalidDimensions(width: i64, height: i64) {
            description("maze dimensions out of range")
            display("invalid maze dimensions {}x{}: width and height must be between 1 and {} and the grid must fit in memory", width, height, u32::MAX)
        }
        InvalidMeasurement(name: &'static str, value: f32) {
            description("invalid maze measurement")
            display("invalid maze measurement {} = {}", name, value)
        }
    }
}
