use crate::ui::{theme, Icons, Tone};

pub fn header(text: &str) {
    println!("{} {}", Icons::ROCKET, theme().paint(Tone::Heading, text));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, theme().paint(Tone::Good, label));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, theme().paint(Tone::Bad, label));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, theme().paint(Tone::Caution, label));
}

pub fn info(label: &str, value: &str) {
    println!("{} {}: {}", Icons::INFO, theme().paint(Tone::Muted, label), value);
}

pub fn section(title: &str) {
    println!();
    println!("━━ {} ━━", theme().paint(Tone::Heading, title));
}
