use spincrate::app;

fn main() {
    if let Err(e) = app::run() {
        eprintln!("spincrate exited with an error: {e}");
    }
}
