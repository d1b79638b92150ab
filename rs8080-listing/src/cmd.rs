/// 8080 mnemonics.
#[allow(clippy::upper_case_acronyms)]
#[derive(AsRefStr, IntoStaticStr, EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cmd {
    // misc / control
    NOP,
    HLT,
    DI,
    EI,
    IN,
    OUT,

    // accumulator and carry
    DAA,
    RLC,
    RRC,
    RAL,
    RAR,
    CMA,
    CMC,
    STC,

    // loads and stores
    LXI,
    LDAX,
    STAX,
    LDA,
    STA,
    LHLD,
    SHLD,
    MOV,
    MVI,
    XCHG,
    XTHL,
    SPHL,
    PCHL,
    PUSH,
    POP,

    // increments
    INR,
    DCR,
    INX,
    DCX,
    DAD,

    // 8-bit alu
    ADD,
    ADC,
    SUB,
    SBB,
    ANA,
    XRA,
    ORA,
    CMP,
    ADI,
    ACI,
    SUI,
    SBI,
    ANI,
    XRI,
    ORI,
    CPI,

    // branches
    JMP,
    JNZ,
    JZ,
    JNC,
    JC,
    JPO,
    JPE,
    JP,
    JM,
    CALL,
    CNZ,
    CZ,
    CNC,
    CC,
    CPO,
    CPE,
    CP,
    CM,
    RET,
    RNZ,
    RZ,
    RNC,
    RC,
    RPO,
    RPE,
    RP,
    RM,
    RST,
}
