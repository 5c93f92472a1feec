use anyhow::Result;
use console::style;
use dialoguer::Input;

/// Holds the terminal after a file's report until the user presses Enter.
/// Does nothing when disabled or when nobody is at the terminal.
pub fn pause_after_report(enabled: bool) -> Result<()> {
    if !enabled || !console::user_attended() {
        return Ok(());
    }

    let prompt = format!("{}", style("Press Enter to continue").dim());

    let _: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .report(false)
        .interact_text()?;

    Ok(())
}
