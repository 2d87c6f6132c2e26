//! 대화형 셸.
//!
//! 표준 입력 한 줄 = 한 명령. 명령을 컨트롤러 호출로 옮기고
//! 결과 화면을 문자열로 돌려준다. Ctrl+C 또는 `quit`로 종료.

use artpick_core::models::page::PageSize;
use artpick_selection::controller::ViewController;
use artpick_selection::store::SelectionChange;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::command::{Command, HELP};
use crate::presenter;

/// 명령 처리 후 다음 동작
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// 출력하고 계속
    Continue(String),
    Quit,
}

pub struct Shell<'a> {
    controller: &'a ViewController,
}

impl<'a> Shell<'a> {
    pub fn new(controller: &'a ViewController) -> Self {
        Self { controller }
    }

    /// 입력 한 줄 처리
    pub async fn handle_line(&self, line: &str) -> Step {
        match Command::parse(line) {
            Ok(command) => self.handle(command).await,
            Err(message) => Step::Continue(format!("{message}\n")),
        }
    }

    pub async fn handle(&self, command: Command) -> Step {
        debug!("명령: {command:?}");
        let view = self.controller.snapshot();
        let page = view.cursor.page_number();

        match command {
            Command::Quit => return Step::Quit,
            Command::Help => return Step::Continue(format!("{HELP}\n")),
            Command::Selected => {
                let (records, unresolved) = self.controller.selected_records();
                return Step::Continue(presenter::render_selected(&records, unresolved));
            }
            Command::Next => {
                if page >= view.page_count {
                    return Step::Continue("Already on the last page\n".to_string());
                }
                self.controller.go_to_page(page + 1).await;
            }
            Command::Prev => {
                if page <= 1 {
                    return Step::Continue("Already on the first page\n".to_string());
                }
                self.controller.go_to_page(page - 1).await;
            }
            Command::Page(target) => {
                if target == 0 || target > view.page_count {
                    return Step::Continue(format!(
                        "Page {target} is out of range (1-{})\n",
                        view.page_count
                    ));
                }
                self.controller.go_to_page(target).await;
            }
            Command::Size(rows) => {
                // 위젯과 같은 경로: 현재 첫 항목 + 새 행 수
                self.controller.change_page(view.cursor.first, rows).await;
            }
            Command::Check(ids) => {
                self.controller.apply_selection(SelectionChange::Delta {
                    checked: ids,
                    unchecked: Vec::new(),
                });
            }
            Command::Uncheck(ids) => {
                self.controller.apply_selection(SelectionChange::Delta {
                    checked: Vec::new(),
                    unchecked: ids,
                });
            }
            Command::Only(ids) => {
                self.controller.apply_selection(SelectionChange::Full(ids));
            }
            Command::Select(input) => {
                if input.trim().is_empty() {
                    return Step::Continue("Usage: select <number>\n".to_string());
                }
                self.controller.submit_bulk(&input).await;
            }
            Command::Show => {}
        }

        Step::Continue(presenter::render(&self.controller.snapshot()))
    }
}

/// 표준 입력 루프
pub async fn run(controller: &ViewController) -> anyhow::Result<()> {
    let shell = Shell::new(controller);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let sizes: Vec<String> = PageSize::ALL.iter().map(|s| s.to_string()).collect();
    stdout
        .write_all(
            format!(
                "{}Type `help` for commands (page sizes: {})\n> ",
                presenter::render(&controller.snapshot()),
                sizes.join(", ")
            )
            .as_bytes(),
        )
        .await?;
    stdout.flush().await?;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C 수신");
                break;
            }
        };

        // EOF
        let Some(line) = line else { break };

        match shell.handle_line(&line).await {
            Step::Quit => break,
            Step::Continue(output) => {
                stdout.write_all(output.as_bytes()).await?;
                stdout.write_all(b"> ").await?;
                stdout.flush().await?;
            }
        }
    }

    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
