use serenity::all::User;

use super::ControlError;
use crate::config::Config;
use crate::player::RepeatMode;
use crate::ui::buttons::ids;

/// One control-surface request, already normalized. Every surface parses
/// into this before anything is gated or applied.
#[derive(Debug, Clone)]
pub enum Action {
    Play { query: String },
    Pause,
    Resume,
    Skip,
    Stop,
    Shuffle,
    /// `None` cycles to the next mode (button path).
    SetLoop(Option<RepeatMode>),
    ShowQueue,
    /// 1-based queue position.
    Remove { position: usize },
    PageNav(PageDirection),
    Avatar(Option<User>),
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}

/// Which surface a request arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Text,
    Slash,
    Component,
}

impl Action {
    /// Read-only actions skip the voice-channel gate.
    pub fn requires_voice(&self) -> bool {
        !matches!(
            self,
            Action::ShowQueue | Action::Help | Action::Avatar(_) | Action::PageNav(_)
        )
    }
}

/// Exact-content banter replies, checked before any command parsing.
const CANNED_TRIGGERS: &[(&str, &str)] = &[
    ("hola", "Pícate la cola mejor"),
    ("valo", "@everyone Saquen el valo"),
    ("fort", "@everyone Saquen el fortnite"),
    ("chupi", "@everyone HOY SE BEBE, PREPÁRENSE PARA EL CHUPI"),
    ("cs", "@everyone Saca el counter"),
];

pub fn canned_reply(content: &str) -> Option<&'static str> {
    CANNED_TRIGGERS
        .iter()
        .find(|(trigger, _)| *trigger == content)
        .map(|(_, reply)| *reply)
}

fn matches_alias(keyword: &str, aliases: &[&str], case_sensitive: bool) -> bool {
    aliases.iter().any(|alias| {
        if case_sensitive {
            *alias == keyword
        } else {
            alias.eq_ignore_ascii_case(keyword)
        }
    })
}

/// Parse a chat message into an action. `None` means the message is not a
/// command at all; `Some(Err(..))` is a recognized command with a bad
/// argument. The command keyword works with and without the prefix.
pub fn parse_message(
    content: &str,
    config: &Config,
    mentions: &[User],
) -> Option<Result<Action, ControlError>> {
    let mut tokens = content.trim().split_whitespace();
    let first = tokens.next()?;
    let keyword = first
        .strip_prefix(config.command_prefix.as_str())
        .unwrap_or(first);
    let case_sensitive = config.case_sensitive_commands;
    let hit = |aliases: &[&str]| matches_alias(keyword, aliases, case_sensitive);

    let parsed = if hit(&["play", "p"]) {
        Ok(Action::Play {
            query: tokens.collect::<Vec<_>>().join(" "),
        })
    } else if hit(&["shuffle", "sh"]) {
        Ok(Action::Shuffle)
    } else if hit(&["pause", "pa"]) {
        Ok(Action::Pause)
    } else if hit(&["resume", "r"]) {
        Ok(Action::Resume)
    } else if hit(&["skip", "s"]) {
        Ok(Action::Skip)
    } else if hit(&["showQueue", "q"]) {
        Ok(Action::ShowQueue)
    } else if hit(&["stop", "st"]) {
        Ok(Action::Stop)
    } else if hit(&["help", "h"]) {
        Ok(Action::Help)
    } else if hit(&["loop", "l"]) {
        parse_loop_mode(tokens.next())
    } else if hit(&["remove", "rm"]) {
        parse_remove_position(tokens.next())
    } else if hit(&["avatar"]) {
        Ok(Action::Avatar(mentions.first().cloned()))
    } else {
        return None;
    };
    Some(parsed)
}

fn parse_loop_mode(argument: Option<&str>) -> Result<Action, ControlError> {
    match argument.and_then(RepeatMode::from_arg) {
        Some(mode) => Ok(Action::SetLoop(Some(mode))),
        None => Err(ControlError::InvalidArgument {
            usage: "Por favor, especifica un modo de bucle válido: `off`, `song` o `queue`."
                .to_string(),
        }),
    }
}

fn parse_remove_position(argument: Option<&str>) -> Result<Action, ControlError> {
    let usage = || ControlError::InvalidArgument {
        usage: "Por favor, proporciona el número de la canción en la cola que deseas eliminar."
            .to_string(),
    };
    let raw = argument.ok_or_else(usage)?;
    let number = raw.parse::<i64>().map_err(|_| usage())?;
    Ok(Action::Remove {
        // Non-positive numbers fall through to the range check.
        position: usize::try_from(number).unwrap_or(0),
    })
}

/// Map a component id from the control or pagination rows to its action.
pub fn parse_component(custom_id: &str) -> Result<Action, ControlError> {
    match custom_id {
        ids::PAUSE => Ok(Action::Pause),
        ids::RESUME => Ok(Action::Resume),
        ids::SKIP => Ok(Action::Skip),
        ids::LOOP => Ok(Action::SetLoop(None)),
        ids::SHOW_QUEUE => Ok(Action::ShowQueue),
        ids::STOP => Ok(Action::Stop),
        ids::PREV_PAGE => Ok(Action::PageNav(PageDirection::Prev)),
        ids::NEXT_PAGE => Ok(Action::PageNav(PageDirection::Next)),
        other => Err(ControlError::UnknownAction(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use test_case::test_case;

    fn config() -> Config {
        Config::default()
    }

    #[test_case("-play despacito" ; "prefixed long form")]
    #[test_case("-p despacito" ; "prefixed short form")]
    #[test_case("play despacito" ; "bare long form")]
    #[test_case("p despacito" ; "bare short form")]
    #[test_case("-PLAY despacito" ; "case folded")]
    fn play_aliases_normalize_to_the_same_action(content: &str) {
        let parsed = parse_message(content, &config(), &[]);
        assert_matches!(
            parsed,
            Some(Ok(Action::Play { query })) if query == "despacito"
        );
    }

    #[test]
    fn play_query_is_rejoined_from_the_remaining_tokens() {
        let parsed = parse_message("-play   never gonna  give", &config(), &[]);
        assert_matches!(
            parsed,
            Some(Ok(Action::Play { query })) if query == "never gonna give"
        );
    }

    #[test_case("-pause", Action::Pause)]
    #[test_case("-pa", Action::Pause)]
    #[test_case("-resume", Action::Resume)]
    #[test_case("-r", Action::Resume)]
    #[test_case("-skip", Action::Skip)]
    #[test_case("-s", Action::Skip)]
    #[test_case("-stop", Action::Stop)]
    #[test_case("-st", Action::Stop)]
    #[test_case("-shuffle", Action::Shuffle)]
    #[test_case("-sh", Action::Shuffle)]
    #[test_case("-showQueue", Action::ShowQueue)]
    #[test_case("-q", Action::ShowQueue)]
    #[test_case("-help", Action::Help)]
    #[test_case("-h", Action::Help)]
    fn argument_free_aliases_parse(content: &str, expected: Action) {
        let parsed = parse_message(content, &config(), &[]).unwrap().unwrap();
        assert_eq!(
            std::mem::discriminant(&parsed),
            std::mem::discriminant(&expected)
        );
    }

    #[test]
    fn unrelated_chatter_is_not_a_command() {
        assert!(parse_message("holaaa que tal", &config(), &[]).is_none());
        assert!(parse_message("", &config(), &[]).is_none());
        assert!(parse_message("- play x", &config(), &[]).is_none());
    }

    #[test]
    fn case_sensitive_mode_requires_the_exact_spelling() {
        let config = Config {
            case_sensitive_commands: true,
            ..Config::default()
        };
        assert!(parse_message("-PLAY x", &config, &[]).is_none());
        assert!(parse_message("-showqueue", &config, &[]).is_none());
        assert_matches!(
            parse_message("-showQueue", &config, &[]),
            Some(Ok(Action::ShowQueue))
        );
    }

    #[test]
    fn loop_requires_a_valid_mode() {
        assert_matches!(
            parse_message("-loop queue", &config(), &[]),
            Some(Ok(Action::SetLoop(Some(RepeatMode::Queue))))
        );
        assert_matches!(
            parse_message("-loop", &config(), &[]),
            Some(Err(ControlError::InvalidArgument { .. }))
        );
        assert_matches!(
            parse_message("-loop sideways", &config(), &[]),
            Some(Err(ControlError::InvalidArgument { .. }))
        );
    }

    #[test]
    fn remove_parses_numbers_and_rejects_the_rest() {
        assert_matches!(
            parse_message("-rm 3", &config(), &[]),
            Some(Ok(Action::Remove { position: 3 }))
        );
        // Negative positions survive parsing and die in the range check.
        assert_matches!(
            parse_message("-remove -5", &config(), &[]),
            Some(Ok(Action::Remove { position: 0 }))
        );
        assert_matches!(
            parse_message("-remove", &config(), &[]),
            Some(Err(ControlError::InvalidArgument { .. }))
        );
        assert_matches!(
            parse_message("-remove tres", &config(), &[]),
            Some(Err(ControlError::InvalidArgument { .. }))
        );
    }

    #[test]
    fn canned_triggers_match_the_exact_content_only() {
        assert_eq!(canned_reply("hola"), Some("Pícate la cola mejor"));
        assert_eq!(canned_reply("cs"), Some("@everyone Saca el counter"));
        assert_eq!(canned_reply("Hola"), None);
        assert_eq!(canned_reply("hola amigos"), None);
    }

    #[test]
    fn component_ids_map_to_actions() {
        assert_matches!(parse_component("pause"), Ok(Action::Pause));
        assert_matches!(parse_component("loop"), Ok(Action::SetLoop(None)));
        assert_matches!(
            parse_component("prevPage"),
            Ok(Action::PageNav(PageDirection::Prev))
        );
        assert_matches!(
            parse_component("nextPage"),
            Ok(Action::PageNav(PageDirection::Next))
        );
        assert_matches!(
            parse_component("selfDestruct"),
            Err(ControlError::UnknownAction(id)) if id == "selfDestruct"
        );
    }

    #[test]
    fn read_only_actions_skip_the_voice_gate() {
        assert!(!Action::ShowQueue.requires_voice());
        assert!(!Action::Help.requires_voice());
        assert!(!Action::Avatar(None).requires_voice());
        assert!(!Action::PageNav(PageDirection::Next).requires_voice());
        assert!(Action::Pause.requires_voice());
        assert!(Action::Stop.requires_voice());
    }
}
