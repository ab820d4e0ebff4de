//! Interactive pinyin session on stdin.
//!
//! Type pinyin to see candidates, a number to choose one, `!` to finish the
//! sentence (committing learning), and `:q` to quit. The dictionary is a
//! small built-in sample.

use std::io::{self, BufRead, Write};

use pinyin_ime::{loader, Ime};

const SAMPLE_DICT: &str = "\
你 8 ni
你好 10 ni'hao
好 6 hao
世界 7 shi'jie
输入 10 shu'ru
输入法 5 shu'ru'fa
法 3 fa
西安 6 xi'an
先 4 xian
";

fn print_candidates(ime: &Ime) {
    if ime.candidates().is_empty() {
        println!("(no candidates)");
        return;
    }
    for (i, entry) in ime.candidates().iter(ime.lexicon()).enumerate() {
        println!("  {}. {} [{} {}]", i, entry.chinese(), entry.pinyin(), entry.freq());
    }
}

fn main() -> io::Result<()> {
    let mut ime = Ime::new();
    let count = loader::load(&mut ime, SAMPLE_DICT.as_bytes())?;
    println!("loaded {} entries", count);
    println!("type pinyin; a number chooses; '!' finishes; ':q' quits");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input == ":q" {
            break;
        }
        if input == "!" {
            if let Err(e) = ime.finish_search(true, true) {
                println!("finish failed: {}", e);
            }
            println!("committed; session reset");
            continue;
        }
        if let Ok(index) = input.parse::<usize>() {
            match ime.choose(index) {
                Ok(_) => {
                    let fixed = &ime.letters()[..ime.fixed_letters()];
                    println!("fixed: {}", fixed);
                    print_candidates(&ime);
                }
                Err(e) => println!("choose failed: {}", e),
            }
            continue;
        }
        ime.search(input);
        print_candidates(&ime);
    }
    Ok(())
}
