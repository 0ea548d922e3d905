use serde::Serialize;

use crate::exit_codes;
use crate::output::emit;
use crate::OutputArgs;

#[derive(Serialize)]
struct CandidatesResult {
    seed: String,
    candidates: Vec<String>,
}

pub fn candidates_cmd(url: &str, output: OutputArgs) -> i32 {
    let result = CandidatesResult {
        seed: url.to_string(),
        candidates: apiprobe_exec::candidates(url),
    };

    emit(&output, &result, |r| {
        for (i, c) in r.candidates.iter().enumerate() {
            println!("{:>2}. {c}", i + 1);
        }
    });

    exit_codes::SUCCESS
}
