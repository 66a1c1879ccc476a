use can_diff::{
    DbcParseError, Endianness, ParseOptions, Signess, TextEncoding, from_dbc_file,
    from_dbc_file_with, parse, parse_bytes,
};

const BODY_CAN: &str = r#"VERSION "2.4"

NS_ :
	BA_
	BA_DEF_
	CM_

BS_:

BU_: BCM Door_FL Door_FR Gateway

BO_ 2364540158 DoorStatus: 8 Door_FL
 SG_ Latch_Open : 0|1@1+ (1,0) [0|1] "" BCM,Gateway
 SG_ Window_Pos : 8|8@1+ (0.5,0) [0|100] "%" BCM
 SG_ Mirror_Fold m0 : 16|2@1+ (1,0) [0|3] "" BCM

BO_ 1280 BCM_Command: 64 BCM
 SG_ Lock_Request : 7|2@0+ (1,0) [0|3] "" Door_FL Door_FR
 SG_ Interior_Light : 15|8@0- (1,-100) [-100|155] "lx" Vector__XXX

BA_DEF_ BO_ "GenMsgCycleTime" INT 0 65535;
BA_DEF_ BO_ "VFrameFormat" ENUM "StandardCAN","ExtendedCAN","reserved","J1939PG";
BA_DEF_DEF_ "GenMsgCycleTime" 0;
BA_ "DBName" "Body_CAN";
BA_ "BusType" "CAN FD";
BA_ "Baudrate" 500000;
BA_ "BaudrateCANFD" 2000000;
BA_ "GenMsgCycleTime" BO_ 2364540158 100;
BA_ "GenMsgSendType" BO_ 2364540158 7;
BA_ "VFrameFormat" BO_ 1280 15;
BA_ "CANFD_BRS" BO_ 1280 0;
BA_ "DiagRequest" BO_ 1280 1;
BA_ "GenSigStartValue" SG_ 1280 Interior_Light 100;
BA_ "InvalidValue" SG_ 1280 Interior_Light "0xFF";
BA_ "GenSigSendType" SG_ 2364540158 Latch_Open 3;
BA_ "GenSigTimeoutTime_ALL" SG_ 2364540158 Latch_Open 500;
BA_ "SystemSignalLongSymbol" SG_ 2364540158 Window_Pos "Window_Position_Percent";
BA_ "GenMsgCycleTime" BO_ 2364540158 oops;

CM_ BO_ 1280 "Commands sent by the BCM
to both front doors";
CM_ SG_ 2364540158 Latch_Open "1 = latch open";
CM_ BU_ BCM "Body controller";

VAL_ 1280 Lock_Request 0 "Idle" 1 "Lock" 2 "Unlock" 3 "Invalid" ;
VAL_ 999 Ghost 0 "Nope" ;
"#;

#[test]
fn test_document_attributes() {
    let db = parse(BODY_CAN);
    assert_eq!(db.version, "2.4");
    assert_eq!(db.name, "Body_CAN");
    assert_eq!(db.bus_type, "CAN FD");
    assert_eq!(db.baudrate, 500_000);
    assert_eq!(db.baudrate_canfd, 2_000_000);
    assert_eq!(db.nodes, vec!["BCM", "Door_FL", "Door_FR", "Gateway"]);
    assert_eq!(db.message_count(), 2);
    assert_eq!(db.signal_count(), 5);
}

#[test]
fn test_message_attributes() {
    let db = parse(BODY_CAN);

    let door = db.get_message_by_id_hex("0x8CF004FE").unwrap();
    assert_eq!(door.id, 2364540158);
    assert_eq!(door.cycle_time, 100);
    assert_eq!(door.send_type, 7);
    assert_eq!(door.vframe_format, 14);
    assert_eq!(door.canfd_brs, 1);
    assert_eq!(door.il_support, 1);

    let cmd = db.get_message_by_id(1280).unwrap();
    assert_eq!(cmd.byte_length, 64);
    assert_eq!(cmd.vframe_format, 15);
    assert_eq!(cmd.canfd_brs, 0);
    assert_eq!(cmd.diag_request, 1);
    assert_eq!(cmd.cycle_time, 0);
    assert_eq!(cmd.comment, "Commands sent by the BCM\nto both front doors");
}

#[test]
fn test_signal_fields() {
    let db = parse(BODY_CAN);

    let latch = db.get_signal_by_name(2364540158, "Latch_Open").unwrap();
    assert_eq!(latch.send_type, 3);
    assert_eq!(latch.timeout_time, 500);
    assert_eq!(latch.comment, "1 = latch open");
    assert_eq!(latch.receiver_nodes, vec!["BCM", "Gateway"]);

    let window = db.get_signal_by_name(2364540158, "Window_Pos").unwrap();
    assert_eq!(window.display_name(), "Window_Position_Percent");
    assert_eq!(window.factor, 0.5);
    assert_eq!(window.unit_of_measurement, "%");

    // multiplexed signals are kept as plain signals
    assert!(db.get_signal_by_name(2364540158, "Mirror_Fold").is_some());

    let lock = db.get_signal_by_name(1280, "Lock_Request").unwrap();
    assert_eq!(lock.endian, Endianness::Motorola);
    assert_eq!(lock.bit_start, 7);
    assert_eq!(lock.receiver_nodes, vec!["Door_FL", "Door_FR"]);
    assert_eq!(
        lock.value_description(),
        "0: Idle, 1: Lock, 2: Unlock, 3: Invalid"
    );

    let light = db.get_signal_by_name(1280, "Interior_Light").unwrap();
    assert_eq!(light.sign, Signess::Signed);
    assert_eq!(light.offset, -100.0);
    assert_eq!(light.start_value, 100);
    assert_eq!(light.invalid_value.as_deref(), Some("0xFF"));
    assert_eq!(light.inactive_value, 0);
}

#[test]
fn test_signal_order_follows_declaration() {
    let db = parse(BODY_CAN);
    let door = db.get_message_by_id(2364540158).unwrap();
    let names: Vec<&str> = db.signals_of(door).map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Latch_Open", "Window_Pos", "Mirror_Fold"]);
}

#[test]
fn test_duplicate_records_last_wins() {
    let db = parse(
        "BO_ 1 First: 8 N\n SG_ S : 0|8@1+ (1,0) [0|255] \"\" N\n\
         BO_ 2 Other: 8 N\n\
         BO_ 1 Second: 4 N\n SG_ T : 0|8@1+ (1,0) [0|255] \"\" N\n\
         BA_ \"GenMsgCycleTime\" BO_ 1 10;\n\
         BA_ \"GenMsgCycleTime\" BO_ 1 20;\n\
         CM_ BO_ 1 \"one\";\n\
         CM_ BO_ 1 \"two\";\n",
    );
    let ids: Vec<u32> = db.message_ids().collect();
    assert_eq!(ids, vec![1, 2]);

    let msg = db.get_message_by_id(1).unwrap();
    assert_eq!(msg.name, "Second");
    assert_eq!(msg.byte_length, 4);
    assert_eq!(msg.cycle_time, 20);
    assert_eq!(msg.comment, "two");
    let names: Vec<&str> = msg.signals(&db).map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["T"]);
    assert_eq!(db.signal_count(), 1);
}

#[test]
fn test_windows_1252_file() {
    let mut bytes: Vec<u8> = b"BO_ 1 M: 8 N\nCM_ BO_ 1 \"T\xfcr offen\";\n".to_vec();
    bytes.extend_from_slice(b"BA_ \"DBName\" \"K\xf6rper\";\n");

    let path = std::env::temp_dir().join("can_diff_windows_1252.dbc");
    std::fs::write(&path, &bytes).unwrap();
    let path = path.to_str().unwrap();

    let auto = from_dbc_file_with(
        path,
        &ParseOptions {
            encoding: TextEncoding::Auto,
            transliterate: false,
        },
    )
    .unwrap();
    assert_eq!(auto.get_message_by_id(1).unwrap().comment, "Tür offen");
    assert_eq!(auto.name, "Körper");

    let lossy = from_dbc_file(path).unwrap();
    assert_eq!(lossy.get_message_by_id(1).unwrap().comment, "T\u{FFFD}r offen");

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_parse_bytes_with_bom_and_transliteration() {
    let mut bytes: Vec<u8> = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("BO_ 7 Größe: 8 N\n".as_bytes());

    let db = parse_bytes(&bytes, &ParseOptions::default());
    assert_eq!(db.get_message_by_id(7).unwrap().name, "Größe");

    let db = parse_bytes(
        &bytes,
        &ParseOptions {
            encoding: TextEncoding::Utf8Lossy,
            transliterate: true,
        },
    );
    assert_eq!(db.get_message_by_id(7).unwrap().name, "Grosse");
}

#[test]
fn test_missing_file_is_an_error() {
    let err = from_dbc_file("/no/such/dir/Body_CAN.dbc").unwrap_err();
    assert!(matches!(err, DbcParseError::OpenFile { .. }));
    assert_eq!(err.path(), "/no/such/dir/Body_CAN.dbc");
}
