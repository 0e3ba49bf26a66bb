use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("no records found for request id") {
        push_hint(
            &mut out,
            "Run `ixmon summary` to list the request ids present in the feeds.",
        );
        push_hint(&mut out, "Check `--feeds DIR` points at the right snapshot.");
    }

    if haystack.contains("oid directory") && haystack.contains("no such file") {
        push_hint(
            &mut out,
            "Place `oids.json` in the feed directory or pass `--feeds DIR`.",
        );
    }

    if haystack.contains("case file") || haystack.contains("invalid governance case") {
        push_hint(
            &mut out,
            "The case file must be a JSON object with `id`, `issueType` and `organization`.",
        );
    }

    if haystack.contains("settings") && haystack.contains("toml") {
        push_hint(
            &mut out,
            "Check `ixmon.toml` syntax and key names under [health], [feeds] and [kb].",
        );
    }

    if haystack.contains("invalid health thresholds") {
        push_hint(
            &mut out,
            "`degraded_min_pct` must not be greater than `stable_min_pct`.",
        );
    }

    if haystack.contains("failed to write key") {
        push_hint(
            &mut out,
            "Make sure the knowledge-base directory is writable, or pass `--store DIR`.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}
