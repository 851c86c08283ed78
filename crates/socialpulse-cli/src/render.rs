//! Plain-text rendering of composed pages

use socialpulse_view::{
    InfluencerRow, KeywordTag, OverviewCard, PageView, Panel, PostRow, Section, SectionBody,
    SelectControl, SentimentSlice, TimelineRow, TopicBar, ViralityCard,
};
use std::fmt::{self, Write};

const TEXT_WIDTH: usize = 96;

fn truncate(text: &str, width: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= width {
        return single_line;
    }
    let mut out: String = single_line.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Renders a whole page: title, active filters, then every section
pub struct PageText<'a>(pub &'a PageView);

impl fmt::Display for PageText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(f, "== {} ==", view.title)?;
        if view.filters_panel_visible && !view.chips.is_empty() {
            let chips: Vec<String> = view.chips.iter().map(|c| c.label()).collect();
            writeln!(f, "Filters: {}", chips.join(" | "))?;
        }
        write!(f, "{}", SectionsText(&view.sections))
    }
}

/// Renders a list of sections
pub struct SectionsText<'a>(pub &'a [Section]);

impl fmt::Display for SectionsText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in self.0 {
            writeln!(f)?;
            writeln!(f, "-- {} --", section.title)?;
            let mut body = String::new();
            write_body(&mut body, &section.body)?;
            f.write_str(&body)?;
        }
        Ok(())
    }
}

fn write_body(out: &mut String, body: &SectionBody) -> fmt::Result {
    match body {
        SectionBody::OverviewCards(panel) => write_panel(out, panel, write_cards),
        SectionBody::Virality(panel) => write_panel(out, panel, write_virality),
        SectionBody::Sentiment { detailed, panel } => {
            write_panel(out, panel, |out, slices| write_sentiment(out, slices, *detailed))
        }
        SectionBody::Topics { panel, .. } => write_panel(out, panel, write_topics),
        SectionBody::Timeline(panel) => write_panel(out, panel, write_timeline),
        SectionBody::Keywords(panel) => write_panel(out, panel, write_keywords),
        SectionBody::Posts(panel) => write_panel(out, panel, write_posts),
        SectionBody::Influencers(panel) => write_panel(out, panel, write_influencers),
        SectionBody::FilterOptions(panel) => write_panel(out, panel, write_controls),
    }
}

fn write_panel<T>(
    out: &mut String,
    panel: &Panel<Vec<T>>,
    ready: impl FnOnce(&mut String, &[T]) -> fmt::Result,
) -> fmt::Result {
    match panel {
        Panel::Ready(items) => ready(out, items.as_slice()),
        Panel::Failed(message) => writeln!(out, "  ! {}", message),
        other => writeln!(out, "  {}", other.message().unwrap_or_default()),
    }
}

fn write_cards(out: &mut String, cards: &[OverviewCard]) -> fmt::Result {
    for card in cards {
        writeln!(
            out,
            "  {:<14} {:>10}  {}",
            card.title, card.value, card.description
        )?;
    }
    Ok(())
}

fn write_virality(out: &mut String, cards: &[ViralityCard]) -> fmt::Result {
    for (index, card) in cards.iter().enumerate() {
        let sentiment = card
            .sentiment
            .as_deref()
            .map(|s| format!(" ({})", s))
            .unwrap_or_default();
        writeln!(
            out,
            "  {}. {} [{}]{}  {:.1}/h  {}h ago  {} likes {} comments {} shares",
            index + 1,
            card.source_id,
            card.platform,
            sentiment,
            card.velocity,
            card.hours_since_post,
            card.likes,
            card.comments,
            card.shares
        )?;
        writeln!(out, "     {}", truncate(&card.text, TEXT_WIDTH))?;
    }
    Ok(())
}

fn write_sentiment(out: &mut String, slices: &[SentimentSlice], detailed: bool) -> fmt::Result {
    let total: u64 = slices.iter().map(|s| s.value).sum();
    for slice in slices {
        let share = if total == 0 {
            0.0
        } else {
            slice.value as f64 / total as f64 * 100.0
        };
        write!(out, "  {:<10} {:>8} {:>4.0}%", slice.label, slice.value, share)?;
        if detailed {
            if let Some(confidence) = slice.confidence {
                write!(out, "  {:.1}% confidence", confidence * 100.0)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_topics(out: &mut String, bars: &[TopicBar]) -> fmt::Result {
    writeln!(out, "  {:<28} {:>8} {:>12}", "Topic", "Posts", "Engagement")?;
    for bar in bars {
        writeln!(
            out,
            "  {:<28} {:>8} {:>12}",
            truncate(&bar.label, 28),
            bar.posts,
            bar.engagement
        )?;
    }
    Ok(())
}

fn write_timeline(out: &mut String, rows: &[TimelineRow]) -> fmt::Result {
    writeln!(
        out,
        "  {:<12} {:>9} {:>9} {:>9}",
        "Date", "Positive", "Neutral", "Negative"
    )?;
    for row in rows {
        writeln!(
            out,
            "  {:<12} {:>9} {:>9} {:>9}",
            row.date, row.positive, row.neutral, row.negative
        )?;
    }
    Ok(())
}

fn write_keywords(out: &mut String, tags: &[KeywordTag]) -> fmt::Result {
    for tag in tags {
        writeln!(
            out,
            "  {:<20} {:>6}  {:>5.1}px  {}",
            tag.word, tag.count, tag.font_size, tag.color
        )?;
    }
    Ok(())
}

fn write_posts(out: &mut String, rows: &[PostRow]) -> fmt::Result {
    for row in rows {
        let confidence = row
            .confidence_pct
            .map(|pct| format!(" {}%", pct))
            .unwrap_or_default();
        writeln!(
            out,
            "  [{}] {}  {}{}  {}",
            row.platform, row.source, row.sentiment, confidence, row.date
        )?;
        writeln!(out, "    {}", truncate(&row.text, TEXT_WIDTH))?;
        if !row.topics.is_empty() {
            writeln!(out, "    topics: {}", row.topics.join(", "))?;
        }
        writeln!(
            out,
            "    {} likes  {} comments  {} shares",
            row.likes, row.comments, row.shares
        )?;
        if let Some(url) = &row.url {
            writeln!(out, "    {}", url)?;
        }
    }
    Ok(())
}

fn write_influencers(out: &mut String, rows: &[InfluencerRow]) -> fmt::Result {
    writeln!(
        out,
        "  {:>4}  {:<24} {:>6} {:>9} {:>8} {:>9} {:>11}  {}",
        "#", "Account", "Posts", "Likes", "Shares", "Comments", "Engagement", "Sentiment"
    )?;
    for row in rows {
        writeln!(
            out,
            "  {:>4}  {:<24} {:>6} {:>9} {:>8} {:>9} {:>11}  {}",
            row.rank,
            truncate(&row.account, 24),
            row.posts,
            row.likes,
            row.shares,
            row.comments,
            row.engagement,
            row.sentiment
        )?;
    }
    Ok(())
}

fn write_controls(out: &mut String, controls: &[SelectControl]) -> fmt::Result {
    for control in controls {
        writeln!(out, "  {} ({}):", control.title, control.key)?;
        let marker = |selected: bool| if selected { "*" } else { " " };
        writeln!(
            out,
            "    {} {}",
            marker(control.selected.is_empty()),
            control.placeholder
        )?;
        for option in &control.options {
            writeln!(
                out,
                "    {} {}",
                marker(control.selected == option.value),
                option.label
            )?;
        }
    }
    Ok(())
}

/// Renders the filter drop-downs outside of a page
pub struct ControlsText<'a>(pub &'a [SelectControl]);

impl fmt::Display for ControlsText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_controls(&mut out, self.0)?;
        f.write_str(&out)
    }
}
