use psat::{
    Decoder,
    Family,
    FrameShape,
    Strictness,
    TelemetryFrame,
    decode_stream,
    format,
    scan,
};

const CAPTURE: &str = include_str!("data/capture.txt");

#[test]
fn it_finds_every_intact_frame_in_a_log() {
    let frames = scan(CAPTURE)
        .map(|frame| (frame.shape().unwrap(), frame.as_str()))
        .collect::<Vec<_>>();

    assert_eq!(
        frames,
        [
            (
                FrameShape::Full,
                "C apng eFaaijtkpokoaB aaaa A aokF eEadjluappjxay"
            ),
            (FrameShape::Half, "C apnh eFaaijtkpokoaB"),
            (FrameShape::Sstv, "S ashd aDbiaaaa qralaitkboFxaa"),
            (FrameShape::Half, "A apnk eFaaijtkpokoaB"),
        ]
    );
}

#[test]
fn it_decodes_a_log_into_spreadsheet_rows() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut psk_rows = String::new();
    let mut sstv_rows = String::new();

    for (frame, result) in decode_stream(CAPTURE, "OK1ABC") {
        let record = result.unwrap_or_else(|error| panic!("{frame:?}: {error}"));
        let report = format(&record);
        match record.frame.family() {
            Family::Psk => psk_rows.push_str(&report.row),
            Family::Sstv => sstv_rows.push_str(&report.row),
        }
    }

    let psk_rows = psk_rows.lines().collect::<Vec<_>>();
    assert_eq!(
        psk_rows,
        [
            "[1] OK1ABC\t\t15782\t87:40:40\tC\t159\t0\t265\t6.229\t4.933\t334\t27",
            "[1] OK1ABC\t\t14687\t81:35:40\tA\t158\t3\t299\t6.451\t4.943\t311\t24",
            "[2] OK1ABC\t\t15783\t87:41:00\tC\t159\t0\t265\t6.229\t4.933\t334\t27",
            "[4] OK1ABC\t\t15786\t87:42:00\tA\t159\t0\t265\t6.229\t4.933\t334\t27",
        ]
    );
    assert_eq!(
        sstv_rows,
        "[3] OK1ABC\t\t18659\t5:10:59\tS\t29\t40\t0\t0\t529\t11\t8\t618\t46\t1015\t0\n"
    );
}

#[test]
fn half_frames_decode_without_status() {
    let frames = scan(CAPTURE).collect::<Vec<_>>();
    let half = frames[1];
    assert_eq!(half.shape(), Some(FrameShape::Half));

    for strictness in [Strictness::Lenient, Strictness::Strict] {
        let frame = Decoder::new(strictness).decode_frame(&half).unwrap();
        let TelemetryFrame::Psk(frame) = frame
        else {
            panic!("expected psk frame: {frame:?}");
        };
        assert_eq!(frame.current.clock, 15783);
        assert_eq!(frame.status.raw, 0);
        assert_eq!(frame.history, None);
    }
}
