use crate::stats_table::LINES;

/// A leaderboard shown on the summary page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  pub metric: &'static str,
  pub title: &'static str,
  /// Message for the first place. `%s` is replaced with the nick, `%d` with the value.
  pub first_place: Option<&'static str>,
  /// Message for the second place, same placeholders as `first_place`.
  pub second_place: Option<&'static str>,
  /// Whether the leaderboard link asks for values as a percentage of lines.
  pub show_percentage: bool,
}

/// The leaderboards of the summary page, in the order they're shown.
pub static SUMMARY_FIELDS: [FieldSpec; 4] = [
  FieldSpec {
    metric: LINES,
    title: "Lines",
    first_place: Some("%s wrote the most lines: %d"),
    second_place: Some("%s wrote almost as much lines: %d"),
    show_percentage: false,
  },
  FieldSpec {
    metric: "foul",
    title: "Foul Language",
    first_place: Some("%s makes sailors blush"),
    second_place: Some("%s has a potty mouth as well"),
    show_percentage: false,
  },
  FieldSpec {
    metric: "happy",
    title: "Happy",
    first_place: Some("%s is the happiest person on the channel"),
    second_place: Some("%s is quite happy as well"),
    show_percentage: false,
  },
  FieldSpec {
    metric: "unhappy",
    title: "Unhappy",
    first_place: Some("%s is the saddest person on the channel"),
    second_place: Some("%s is quite sad as well"),
    show_percentage: false,
  },
];

/// A "big numbers" sentence about the nick with the highest value of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigNumber {
  pub metric: &'static str,
  /// `%s` is replaced with the nick, `%d` with the value.
  pub message: &'static str,
  /// Shows the value as a percentage of the nick's lines instead of the raw count.
  pub as_percentage: bool,
}

pub static BIG_NUMBERS: [BigNumber; 9] = [
  BigNumber {
    metric: "question",
    message: "Is %s stupid or just asking too many questions? %d of their lines contained a question!",
    as_percentage: true,
  },
  BigNumber {
    metric: "loud",
    message: "The loudest one was %s, who yelled %d of the time.",
    as_percentage: true,
  },
  BigNumber {
    metric: "url",
    message: "Total of %d URLs were pasted by %s!!",
    as_percentage: false,
  },
  BigNumber {
    metric: "joins",
    message: "%s didn't know whether to stay. They joined the channel %d times!",
    as_percentage: false,
  },
  BigNumber {
    metric: "dokick",
    message: "%s kicked the ass most, %d times to be exact!",
    as_percentage: false,
  },
  BigNumber {
    metric: "getkick",
    message: "Obviously someone does not like %s, they were kicked %d times!",
    as_percentage: false,
  },
  BigNumber {
    metric: "caps",
    message: "%s is a clear caps-abuser, %d of the time they wrote in CAPS.",
    as_percentage: true,
  },
  BigNumber {
    metric: "happy",
    message: "%s is either using drugs or is otherwise a very happy person ;D",
    as_percentage: false,
  },
  BigNumber {
    metric: "unhappy",
    message: "On the other hand %s seems to be quite sad :(",
    as_percentage: false,
  },
];

impl FieldSpec {
  pub fn find(metric: &str) -> Option<&'static FieldSpec> {
    SUMMARY_FIELDS.iter().find(|field| field.metric == metric)
  }
}

/// Replaces `%s` with the nick and `%d` with the value in a single pass.
///
/// Placeholders inside the substituted text are left alone.
pub fn expand_message(template: &str, nick: &str, value: &str) -> String {
  let mut message = String::with_capacity(template.len() + nick.len() + value.len());
  let mut remaining = template;

  while let Some(position) = remaining.find('%') {
    message.push_str(&remaining[..position]);

    let placeholder = &remaining[position..];

    if placeholder.starts_with("%s") {
      message.push_str(nick);
      remaining = &placeholder[2..];
    } else if placeholder.starts_with("%d") {
      message.push_str(value);
      remaining = &placeholder[2..];
    } else {
      message.push('%');
      remaining = &placeholder[1..];
    }
  }

  message.push_str(remaining);

  message
}
