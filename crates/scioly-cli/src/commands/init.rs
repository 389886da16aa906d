//! The `scioly init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("scioly.toml").exists() {
        println!("scioly.toml already exists, skipping.");
    } else {
        std::fs::write("scioly.toml", SAMPLE_CONFIG)?;
        println!("Created scioly.toml");
    }

    let bank_path = std::path::Path::new("questions.json");
    if bank_path.exists() {
        println!("questions.json already exists, skipping.");
    } else {
        std::fs::write(bank_path, SAMPLE_BANK)?;
        println!("Created questions.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: scioly validate");
    println!("  2. Run: scioly study --event Astronomy");
    println!("  3. Run: scioly drill --event \"Circuit Lab\" --limit 60");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# scioly configuration

bank_path = "questions.json"
# default_event = "Astronomy"
seconds_per_question = 30
shuffle = true
# seed = 42
output_dir = "."
"#;

const SAMPLE_BANK: &str = r#"[
  {
    "event": "Astronomy",
    "topic": "Stars",
    "difficulty": "Easy",
    "question": "Which is the brightest star in the night sky?",
    "options": ["Sirius", "Betelgeuse", "Rigel", "Vega"],
    "answer": "Sirius",
    "hint": "It is in the constellation Canis Major."
  },
  {
    "event": "Astronomy",
    "topic": "Stellar Evolution",
    "difficulty": "Medium",
    "question": "The H-R diagram plots which two properties?",
    "options": ["Mass vs Temperature", "Luminosity vs Temperature", "Distance vs Brightness", "Radius vs Mass"],
    "answer": "Luminosity vs Temperature"
  },
  {
    "event": "Forensics",
    "topic": "DNA",
    "difficulty": "Easy",
    "question": "Which technique separates DNA fragments?",
    "options": ["Chromatography", "Electrophoresis", "Spectroscopy", "Centrifugation"],
    "answer": "Electrophoresis"
  },
  {
    "event": "Forensics",
    "topic": "Fingerprints",
    "difficulty": "Medium",
    "question": "Fingerprints are classified into how many main types?",
    "options": ["2", "3", "4", "5"],
    "answer": "3",
    "hint": "Loops, whorls and one more."
  },
  {
    "event": "Circuit Lab",
    "topic": "Basics",
    "difficulty": "Easy",
    "question": "Ohm's Law formula is?",
    "options": ["V=IR", "P=VI", "V=I^2R", "E=mc^2"],
    "answer": "V=IR",
    "hint": "Voltage equals current times resistance."
  },
  {
    "event": "Circuit Lab",
    "topic": "Resistors",
    "difficulty": "Medium",
    "question": "Resistors in series have which total resistance?",
    "options": ["Sum of resistances", "Reciprocal sum", "Maximum resistance", "Minimum resistance"],
    "answer": "Sum of resistances"
  },
  {
    "event": "Remote Sensing",
    "topic": "Spectrum",
    "difficulty": "Easy",
    "question": "Which part of EM spectrum is used for thermal imaging?",
    "options": ["Infrared", "Visible", "UV", "Microwave"],
    "answer": "Infrared"
  },
  {
    "event": "Remote Sensing",
    "topic": "Satellites",
    "difficulty": "Hard",
    "question": "Which satellite provides daily images for climate monitoring?",
    "options": ["GOES", "Hubble", "Chandra", "Kepler"],
    "answer": "GOES"
  }
]
"#;
