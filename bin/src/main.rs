use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anagram_search_core::data;
use anagram_search_core::dictionary::WordIndex;
use anagram_search_core::matcher::{Match, MatchDriver, TargetDigest};
use anagram_search_core::search::CombinationSearch;
use anagram_search_core::structs::SingleLetters;
use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use md5::{Digest, Md5};

const MD5_DIGEST_LEN: usize = 16;

#[derive(Parser, Debug)]
#[clap(
    name = "anagram-search",
    about = "Searches a word list for multi-word anagram phrases matching a set of MD5 digests"
)]
struct Options {
    /// Maximum number of words in a phrase
    max_words: usize,
    /// Number of worker threads
    threads: usize,
    /// Path to the word list, one word per line
    dictionary: PathBuf,
    /// The anagram to rearrange (letters and spaces only)
    anagram: String,
    /// Target MD5 digests, in hex
    #[clap(required = true)]
    hashes: Vec<String>,
    /// Suppress the periodic progress line
    #[clap(long)]
    silence: bool,
}

struct ProgressState {
    last_update: Instant,
    last_total: u64,
}

fn main() -> Result<()> {
    let options = Options::parse();
    if options.threads == 0 {
        bail!("number of threads must be positive");
    }

    let filter = data::filter_from_anagram(&options.anagram).context("invalid anagram string")?;
    if filter.is_empty() {
        bail!("anagram string is empty");
    }

    let targets = options
        .hashes
        .iter()
        .map(|hex| {
            let target = TargetDigest::from_hex(hex)
                .with_context(|| format!("invalid MD5 hash \"{hex}\""))?;
            if target.bytes.len() != MD5_DIGEST_LEN {
                bail!("\"{hex}\" is not a 128-bit digest");
            }
            Ok(target)
        })
        .collect::<Result<Vec<_>>>()?;

    println!("Anagram: {}", options.anagram.trim());
    println!("Word dictionary: {}", options.dictionary.display());
    println!("Max number of words: {}", options.max_words);
    println!(
        "MD5 hashes: {}",
        targets
            .iter()
            .map(|t| t.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Number of threads: {}", options.threads);

    let words = data::load_words(&options.dictionary)
        .with_context(|| format!("cannot read dictionary {}", options.dictionary.display()))?;
    let singles = SingleLetters::default();
    let index = WordIndex::build(words.iter(), &filter, singles);
    let known = index.profile_set();
    let search =
        CombinationSearch::new(index.profiles(), &known, filter, options.max_words, singles)?;

    println!("Dictionary profiles after filtering: {}", index.len());

    let driver = MatchDriver::new(|phrase: &[u8]| Md5::digest(phrase).to_vec(), targets);

    let started = Instant::now();
    let progress = Mutex::new(ProgressState {
        last_update: started,
        last_total: 0,
    });

    let on_match = |m: Match| {
        let phrase = String::from_utf8_lossy(&m.phrase).to_string();
        let label = &driver.targets()[m.target_index].label;
        println!(
            "-- Elapsed: {:.2}s - Phrase: '{}' - Matched hash: [#{}] {}",
            m.elapsed.as_secs_f64(),
            phrase.green().bold(),
            m.target_index,
            label
        );
    };

    let on_progress = |total: u64| {
        if options.silence {
            return;
        }
        let mut state = progress.lock().unwrap();
        let since_update = state.last_update.elapsed();
        if since_update.as_millis() < 1000 {
            return;
        }
        let elapsed = started.elapsed().as_secs_f64();
        let current = (total - state.last_total) as f64 / since_update.as_secs_f64();
        eprint!(
            "\r-- Elapsed: {:.2}s - Phrases: {} - Average: {:.0} H/s - Current: {:.0} H/s",
            elapsed,
            total,
            total as f64 / elapsed,
            current
        );
        state.last_update = Instant::now();
        state.last_total = total;
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()
        .context("cannot build worker pool")?;
    let report = pool.install(|| driver.run(&index, &search, on_match, on_progress));

    if !options.silence {
        eprintln!();
    }
    println!(
        "-- Elapsed: {:.2}s - Phrases: {} - Average: {:.0} H/s",
        report.elapsed.as_secs_f64(),
        report.phrases_tested,
        report.phrases_tested as f64 / report.elapsed.as_secs_f64()
    );

    Ok(())
}
