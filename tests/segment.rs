use docx_pages::segment::{escape_html, segment_pages};
use docx_pages::{EMPTY_PARAGRAPH_TEXT, PAGE_BREAK_SENTINEL, PLACEHOLDER_BLOCK, Page, ParagraphUnit};

fn unit(text: &str) -> ParagraphUnit {
    ParagraphUnit {
        text: text.to_string(),
        has_table: false,
        has_non_text_content: false,
        unreadable: false,
    }
}

fn html(pages: &[Page]) -> Vec<String> {
    pages.iter().map(Page::to_html).collect()
}

#[test]
fn paragraphs_without_breaks_form_one_page() {
    let pages = segment_pages(&[unit("One"), unit("Two")]);
    assert_eq!(html(&pages), ["<p>One</p>\n<p>Two</p>"]);
}

#[test]
fn sentinel_closes_the_current_page() {
    let pages = segment_pages(&[
        unit("One"),
        unit(&format!("Two{PAGE_BREAK_SENTINEL}Three")),
        unit("Four"),
    ]);
    assert_eq!(
        html(&pages),
        ["<p>One</p>\n<p>Two</p>", "<p>Three</p>\n<p>Four</p>"]
    );
}

#[test]
fn adjacent_sentinels_produce_placeholder_pages() {
    let pages = segment_pages(&[
        unit("A"),
        unit(&format!(
            "{PAGE_BREAK_SENTINEL}{PAGE_BREAK_SENTINEL}{EMPTY_PARAGRAPH_TEXT}"
        )),
        unit("B"),
    ]);
    assert_eq!(html(&pages), ["<p>A</p>", PLACEHOLDER_BLOCK, "<p>B</p>"]);
}

#[test]
fn leading_sentinel_yields_a_leading_placeholder_page() {
    let pages = segment_pages(&[unit(&format!("{PAGE_BREAK_SENTINEL}Start"))]);
    assert_eq!(html(&pages), [PLACEHOLDER_BLOCK, "<p>Start</p>"]);
}

#[test]
fn trailing_sentinel_does_not_add_an_empty_page() {
    let pages = segment_pages(&[unit(&format!("End{PAGE_BREAK_SENTINEL}")), unit(EMPTY_PARAGRAPH_TEXT)]);
    assert_eq!(html(&pages), ["<p>End</p>"]);
}

#[test]
fn blank_paragraphs_produce_no_blocks() {
    let pages = segment_pages(&[unit(EMPTY_PARAGRAPH_TEXT), unit("  x  "), unit(EMPTY_PARAGRAPH_TEXT)]);
    assert_eq!(html(&pages), ["<p>x</p>"]);
}

#[test]
fn empty_input_yields_one_placeholder_page() {
    assert_eq!(html(&segment_pages(&[])), [PLACEHOLDER_BLOCK]);
    assert_eq!(
        html(&segment_pages(&[unit(EMPTY_PARAGRAPH_TEXT), unit("")])),
        [PLACEHOLDER_BLOCK]
    );
}

#[test]
fn text_is_html_escaped() {
    let pages = segment_pages(&[unit("a < b && \"c\" > 'd'")]);
    assert_eq!(
        html(&pages),
        ["<p>a &lt; b &amp;&amp; &quot;c&quot; &gt; &#39;d&#39;</p>"]
    );
}

#[test]
fn escape_html_leaves_plain_text_alone() {
    assert_eq!(escape_html("Báo cáo tuần [Bảng: A | B ]"), "Báo cáo tuần [Bảng: A | B ]");
    assert_eq!(escape_html("<script>"), "&lt;script&gt;");
}

#[test]
fn pages_are_never_empty_strings() {
    let units: Vec<ParagraphUnit> = [
        PAGE_BREAK_SENTINEL,
        "",
        PAGE_BREAK_SENTINEL,
        " ",
        "text",
        PAGE_BREAK_SENTINEL,
    ]
    .iter()
    .map(|t| unit(t))
    .collect();
    for page in html(&segment_pages(&units)) {
        assert!(!page.trim().is_empty());
        assert_ne!(page.trim(), "<p></p>");
    }
}

#[test]
fn empty_page_renders_as_placeholder() {
    assert_eq!(Page::default().to_html(), PLACEHOLDER_BLOCK);
    assert_eq!(
        Page {
            blocks: vec!["<p></p>".to_string()]
        }
        .to_html(),
        PLACEHOLDER_BLOCK
    );
}

#[test]
fn unreadable_unit_keeps_its_place_as_a_placeholder_block() {
    let pages = segment_pages(&[
        unit(&format!("A{PAGE_BREAK_SENTINEL}")),
        ParagraphUnit::unreadable(),
        unit("B"),
    ]);
    assert_eq!(html(&pages), ["<p>A</p>", "<p>&nbsp;</p>\n<p>B</p>"]);

    let pages = segment_pages(&[ParagraphUnit::unreadable()]);
    assert_eq!(html(&pages), [PLACEHOLDER_BLOCK]);
}
