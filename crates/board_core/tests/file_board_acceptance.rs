use board_core::{Board, BoardIntent, BoardOptions, Effect};
use shared::{OpportunityId, Status};
use storage::{FileBackend, Store};

fn open(dir: &std::path::Path) -> Board<FileBackend> {
    let backend = FileBackend::open(dir).expect("file backend");
    Board::open(Store::new(backend), BoardOptions::default()).expect("open board")
}

#[test]
fn board_state_survives_reopening() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut board = open(dir.path());
        let cards = [
            ("Engineer", "Acme Corp"),
            ("Designer", "Globex"),
            ("Analyst", "Initech"),
        ];
        for (title, company) in cards {
            board
                .dispatch(BoardIntent::Add {
                    title: title.to_string(),
                    company: company.to_string(),
                })
                .expect("add");
        }
        board
            .dispatch(BoardIntent::Move {
                id: OpportunityId(1),
                status: Status::Interview,
            })
            .expect("move");
        let deleted = board
            .dispatch(BoardIntent::Delete { id: OpportunityId(2) })
            .expect("delete");
        assert!(matches!(deleted, Effect::Deleted(_)));
    }

    let mut board = open(dir.path());
    let repo = board.repository();
    assert_eq!(repo.len(), 2);
    assert_eq!(repo.next_id(), OpportunityId(4));
    let moved = repo.find_by_id(OpportunityId(1)).expect("kept");
    assert_eq!(moved.status(), Status::Interview);
    assert!(moved.updated_at() >= moved.created_at());

    let added = board
        .dispatch(BoardIntent::Add {
            title: "Lead".to_string(),
            company: "Hooli".to_string(),
        })
        .expect("add after reopen");
    match added {
        Effect::Added(opp) => assert_eq!(opp.id(), OpportunityId(4)),
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn sample_seeding_persists_immediately() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let backend = FileBackend::open(dir.path()).expect("file backend");
        Board::open(Store::new(backend), BoardOptions { seed_samples: true }).expect("open");
    }

    let board = open(dir.path());
    assert_eq!(board.repository().len(), 3);
    assert_eq!(board.projection().column(Status::Saved).total, 3);
}
