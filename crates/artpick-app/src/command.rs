//! 셸 명령 파싱.
//!
//! 한 줄 입력 → [`Command`]. 테이블 위젯의 이벤트(page-change,
//! selection-change)와 일괄 선택 입력을 텍스트 명령으로 흉내 낸다.

use artpick_core::models::artwork::ArtworkId;

/// 셸 명령
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 다음 페이지
    Next,
    /// 이전 페이지
    Prev,
    /// 지정 페이지 (1부터)
    Page(u32),
    /// 페이지 크기 변경 (검증은 컨트롤러가 한다)
    Size(u32),
    /// 행 체크 (변경분 보고)
    Check(Vec<ArtworkId>),
    /// 행 체크 해제 (변경분 보고)
    Uncheck(Vec<ArtworkId>),
    /// 현재 페이지에서 체크된 행 전체 (전체 상태 보고)
    Only(Vec<ArtworkId>),
    /// 처음 N개 선택: 입력 원문 그대로 전달
    Select(String),
    /// 선택 요약
    Selected,
    /// 현재 페이지 다시 표시
    Show,
    Help,
    Quit,
}

impl Command {
    /// 한 줄 파싱. 실패 시 사용자에게 보여줄 문구 반환
    pub fn parse(line: &str) -> Result<Command, String> {
        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            return Ok(Command::Show);
        };
        let rest: Vec<&str> = tokens.collect();

        match head.to_ascii_lowercase().as_str() {
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Prev),
            "page" | "g" => single_number(&rest, "page <number>").map(Command::Page),
            "size" => single_number(&rest, "size <10|20|30>").map(Command::Size),
            "check" | "c" => id_list(&rest).map(Command::Check),
            "uncheck" | "u" => id_list(&rest).map(Command::Uncheck),
            "only" => id_list_allow_empty(&rest).map(Command::Only),
            "select" | "s" => Ok(Command::Select(rest.join(" "))),
            "selected" | "list" => Ok(Command::Selected),
            "show" | "ls" => Ok(Command::Show),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {other} (type `help`)")),
        }
    }
}

fn single_number(rest: &[&str], usage: &str) -> Result<u32, String> {
    match rest {
        [value] => value
            .parse::<u32>()
            .map_err(|_| format!("Not a number: {value} (usage: {usage})")),
        _ => Err(format!("Usage: {usage}")),
    }
}

fn id_list(rest: &[&str]) -> Result<Vec<ArtworkId>, String> {
    if rest.is_empty() {
        return Err("Give at least one artwork id".to_string());
    }
    id_list_allow_empty(rest)
}

fn id_list_allow_empty(rest: &[&str]) -> Result<Vec<ArtworkId>, String> {
    rest.iter()
        .flat_map(|token| token.split(','))
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<ArtworkId>()
                .map_err(|_| format!("Invalid artwork id: {token}"))
        })
        .collect()
}

pub const HELP: &str = "\
Commands:
  next | n               next page
  prev | p               previous page
  page <n>               go to page n
  size <10|20|30>        rows per page
  check <ids>            check rows on this page
  uncheck <ids>          uncheck rows on this page
  only <ids>             exactly these rows checked on this page (empty = none)
  select <n>             select the first n items of the whole collection
  selected               list selected items
  show                   redraw the table
  quit | q               exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_commands() {
        assert_eq!(Command::parse("next"), Ok(Command::Next));
        assert_eq!(Command::parse("  P "), Ok(Command::Prev));
        assert_eq!(Command::parse("page 4"), Ok(Command::Page(4)));
        assert_eq!(Command::parse("size 30"), Ok(Command::Size(30)));
        assert!(Command::parse("page").is_err());
        assert!(Command::parse("page four").is_err());
    }

    #[test]
    fn selection_commands() {
        assert_eq!(
            Command::parse("check 12 15,16"),
            Ok(Command::Check(vec![12, 15, 16]))
        );
        assert_eq!(Command::parse("uncheck 7"), Ok(Command::Uncheck(vec![7])));
        assert_eq!(Command::parse("only"), Ok(Command::Only(vec![])));
        assert!(Command::parse("check").is_err());
        assert!(Command::parse("check x1").is_err());
    }

    #[test]
    fn select_keeps_raw_input() {
        assert_eq!(
            Command::parse("select 25"),
            Ok(Command::Select("25".to_string()))
        );
        assert_eq!(Command::parse("select"), Ok(Command::Select(String::new())));
        assert_eq!(
            Command::parse("s -3"),
            Ok(Command::Select("-3".to_string()))
        );
    }

    #[test]
    fn empty_line_redraws() {
        assert_eq!(Command::parse(""), Ok(Command::Show));
    }

    #[test]
    fn unknown_command() {
        assert!(Command::parse("dance").unwrap_err().contains("dance"));
    }
}
