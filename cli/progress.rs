use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "Status: [{bar:60.cyan/blue}] {percent}% ({pos}/{len} files)";

pub fn file_bar(total: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}
