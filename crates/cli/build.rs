use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("postcraft")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Postcraft Contributors")
        .about("Turn articles into LinkedIn posts with Google Gemini")
        .arg(
            clap::arg!(-t --tone <TONE> "Tone of the post")
                .global(true)
                .default_value("professional")
                .value_parser(["professional", "inspirational", "witty", "casual", "formal"]),
        )
        .arg(clap::arg!(-a --audience <TEXT> "Who the post is written for").global(true))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").global(true).default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").global(true))
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(clap::Command::new("interactive").about("Start an interactive session (the default)"))
        .subcommand(
            clap::Command::new("url")
                .about("Write a post about the article at URL")
                .arg(clap::arg!(<URL> "Article URL")),
        )
        .subcommand(
            clap::Command::new("topic")
                .about("Write a post from a topic and some context")
                .arg(clap::arg!(--topic <TEXT> "Title or topic of the post").required(true))
                .arg(clap::arg!(--context <TEXT> "Key points, a summary, or pasted article text").required(true)),
        )
        .subcommand(
            clap::Command::new("extract")
                .about("Print the extracted article as JSON without writing a post")
                .arg(clap::arg!([URL] "Article URL"))
                .arg(
                    clap::arg!(--file <PATH> "Local HTML file")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        );

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "postcraft", &completions_dir).unwrap();
    }

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
