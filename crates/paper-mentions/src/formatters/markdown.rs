//! Markdown output formatting.

use crate::models::TopPaperRecord;

/// Format the top-papers view as Markdown, assuming weight-descending input.
#[must_use]
pub fn format_top_papers_markdown(papers: &[TopPaperRecord]) -> String {
    if papers.is_empty() {
        return "No top papers in the current window.".to_string();
    }

    let mut output = format!("# Top papers ({} entries)\n\n", papers.len());

    for (i, paper) in papers.iter().enumerate() {
        output.push_str(&format_top_paper_markdown(paper, i + 1));
        output.push('\n');
    }

    output
}

fn format_top_paper_markdown(paper: &TopPaperRecord, index: usize) -> String {
    let title = paper.title.as_deref().unwrap_or("Untitled");
    let mut output = format!("## {index}. {title}\n\n");

    let mut meta = vec![format!("**Weight**: {}", paper.weight)];
    if let Some(doi) = &paper.doi {
        meta.push(format!("[DOI](https://doi.org/{doi})"));
    }
    if let Some(pubmed_id) = &paper.pubmed_id {
        meta.push(format!("**PubMed**: {pubmed_id}"));
    }
    if let Some(pmcid) = &paper.pmcid {
        meta.push(format!("**PMC**: {pmcid}"));
    }

    output.push_str(&format!("{}\n", meta.join(" | ")));
    output
}
