// src/progress.rs
/// Lightweight progress reporting for a map build.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called once the query point is known.
    fn begin(&mut self, _lat: f64, _lon: f64) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}
    /// The build could not produce data; `finish` still follows.
    fn fail(&mut self, _reason: &str) {}

    /// Called at the end, successful or not, with the number of points drawn.
    fn finish(&mut self, _points: usize) {}
}
